//! Stable merge sort for candidate pools
//!
//! A TimSort: natural runs are found and extended to `minrun` with binary
//! insertion, then merged with galloping. The candidate comparator is not a
//! total order when rated and unrated places mix, so the result depends on
//! the exact sequence of comparisons made; this sort fixes that sequence and
//! never panics on an inconsistent comparator.

use std::cmp::Ordering;

/// Initial galloping threshold
const MIN_GALLOP: usize = 7;

/// Runs shorter than this are extended with binary insertion
const MIN_MERGE: usize = 64;

/// Sort `items` in place, stable, with the given comparator
pub fn timsort_by<T, F>(items: &mut [T], compare: F)
where
    T: Copy,
    F: FnMut(&T, &T) -> Ordering,
{
    let len = items.len();
    if len < 2 {
        return;
    }

    let mut state = SortState {
        items,
        compare,
        runs: Vec::new(),
        min_gallop: MIN_GALLOP,
    };

    let min_run = min_run_length(len);
    let mut low = 0;
    let mut remaining = len;
    while remaining != 0 {
        let mut run_len = state.count_and_make_run(low, low + remaining);
        if run_len < min_run {
            let forced = min_run.min(remaining);
            state.binary_insertion_sort(low, low + run_len, low + forced);
            run_len = forced;
        }
        state.runs.push(Run { base: low, len: run_len });
        state.merge_collapse();
        low += run_len;
        remaining -= run_len;
    }
    state.merge_force_collapse();
}

fn min_run_length(mut n: usize) -> usize {
    let mut low_bit = 0;
    while n >= MIN_MERGE {
        low_bit |= n & 1;
        n >>= 1;
    }
    n + low_bit
}

fn is_less<T, F: FnMut(&T, &T) -> Ordering>(compare: &mut F, a: &T, b: &T) -> bool {
    compare(a, b) == Ordering::Less
}

#[derive(Debug, Clone, Copy)]
struct Run {
    base: usize,
    len: usize,
}

/// Where the merge loops stop
enum MergeTail {
    /// Copy whatever is left of the buffered run
    Rest,
    /// One element of the buffered run is left and belongs at the far end
    Last,
}

struct SortState<'a, T, F> {
    items: &'a mut [T],
    compare: F,
    runs: Vec<Run>,
    min_gallop: usize,
}

impl<T, F> SortState<'_, T, F>
where
    T: Copy,
    F: FnMut(&T, &T) -> Ordering,
{
    /// Length of the run starting at `low`; a strictly descending run is reversed
    fn count_and_make_run(&mut self, low: usize, high: usize) -> usize {
        let next = low + 1;
        if next == high {
            return 1;
        }

        let descending = is_less(&mut self.compare, &self.items[next], &self.items[low]);
        let mut run_len = 2;
        let mut previous = next;
        for idx in next + 1..high {
            let less = is_less(&mut self.compare, &self.items[idx], &self.items[previous]);
            if less != descending {
                break;
            }
            previous = idx;
            run_len += 1;
        }

        if descending {
            self.items[low..low + run_len].reverse();
        }
        run_len
    }

    /// Extend the sorted prefix `[low, start)` to cover `[low, high)`
    fn binary_insertion_sort(&mut self, low: usize, start: usize, high: usize) {
        let first = if low == start { start + 1 } else { start };
        for idx in first..high {
            let pivot = self.items[idx];
            let (mut left, mut right) = (low, idx);
            while left < right {
                let mid = left + ((right - left) >> 1);
                if is_less(&mut self.compare, &pivot, &self.items[mid]) {
                    right = mid;
                } else {
                    left = mid + 1;
                }
            }
            self.items.copy_within(left..idx, left + 1);
            self.items[left] = pivot;
        }
    }

    fn invariant_holds(&self, n: usize) -> bool {
        if n < 2 {
            return true;
        }
        self.runs[n - 2].len > self.runs[n - 1].len + self.runs[n].len
    }

    fn merge_collapse(&mut self) {
        while self.runs.len() > 1 {
            let mut n = self.runs.len() - 2;
            if !self.invariant_holds(n + 1) || !self.invariant_holds(n) {
                if self.runs[n - 1].len < self.runs[n + 1].len {
                    n -= 1;
                }
                self.merge_at(n);
            } else if self.runs[n].len <= self.runs[n + 1].len {
                self.merge_at(n);
            } else {
                break;
            }
        }
    }

    fn merge_force_collapse(&mut self) {
        while self.runs.len() > 1 {
            let mut n = self.runs.len() - 2;
            if n > 0 && self.runs[n - 1].len < self.runs[n + 1].len {
                n -= 1;
            }
            self.merge_at(n);
        }
    }

    /// Merge runs `i` and `i + 1`
    fn merge_at(&mut self, i: usize) {
        let Run { base: mut base_a, len: mut len_a } = self.runs[i];
        let Run { base: base_b, len: len_b } = self.runs[i + 1];
        self.runs[i].len = len_a + len_b;
        self.runs.remove(i + 1);

        // Elements of A already in place before B's first element
        let key = self.items[base_b];
        let skip = gallop_right(&mut self.compare, self.items, &key, base_a, len_a, 0);
        base_a += skip;
        len_a -= skip;
        if len_a == 0 {
            return;
        }

        // Elements of B already in place after A's last element
        let key = self.items[base_a + len_a - 1];
        let len_b = gallop_left(&mut self.compare, self.items, &key, base_b, len_b, len_b - 1);
        if len_b == 0 {
            return;
        }

        if len_a <= len_b {
            self.merge_low(base_a, len_a, base_b, len_b);
        } else {
            self.merge_high(base_a, len_a, base_b, len_b);
        }
    }

    /// Merge left to right, buffering run A
    fn merge_low(&mut self, base_a: usize, mut len_a: usize, base_b: usize, mut len_b: usize) {
        let buffer: Vec<T> = self.items[base_a..base_a + len_a].to_vec();
        let mut dest = base_a;
        let mut cursor_buf = 0;
        let mut cursor_b = base_b;

        self.items[dest] = self.items[cursor_b];
        dest += 1;
        cursor_b += 1;

        let tail = 'merge: {
            len_b -= 1;
            if len_b == 0 {
                break 'merge MergeTail::Rest;
            }
            if len_a == 1 {
                break 'merge MergeTail::Last;
            }

            let mut min_gallop = self.min_gallop;
            loop {
                let mut wins_a = 0;
                let mut wins_b = 0;

                // One pair at a time until a run keeps winning
                loop {
                    if is_less(&mut self.compare, &self.items[cursor_b], &buffer[cursor_buf]) {
                        self.items[dest] = self.items[cursor_b];
                        dest += 1;
                        cursor_b += 1;
                        wins_b += 1;
                        wins_a = 0;
                        len_b -= 1;
                        if len_b == 0 {
                            break 'merge MergeTail::Rest;
                        }
                        if wins_b >= min_gallop {
                            break;
                        }
                    } else {
                        self.items[dest] = buffer[cursor_buf];
                        dest += 1;
                        cursor_buf += 1;
                        wins_a += 1;
                        wins_b = 0;
                        len_a -= 1;
                        if len_a == 1 {
                            break 'merge MergeTail::Last;
                        }
                        if wins_a >= min_gallop {
                            break;
                        }
                    }
                }

                min_gallop += 1;
                let mut first_pass = true;
                while first_pass || wins_a >= MIN_GALLOP || wins_b >= MIN_GALLOP {
                    first_pass = false;
                    min_gallop = min_gallop.saturating_sub(1).max(1);
                    self.min_gallop = min_gallop;

                    let key = self.items[cursor_b];
                    wins_a = gallop_right(&mut self.compare, &buffer, &key, cursor_buf, len_a, 0);
                    if wins_a > 0 {
                        self.items[dest..dest + wins_a].copy_from_slice(&buffer[cursor_buf..cursor_buf + wins_a]);
                        dest += wins_a;
                        cursor_buf += wins_a;
                        len_a -= wins_a;
                        if len_a == 1 {
                            break 'merge MergeTail::Last;
                        }
                        if len_a == 0 {
                            break 'merge MergeTail::Rest;
                        }
                    }
                    self.items[dest] = self.items[cursor_b];
                    dest += 1;
                    cursor_b += 1;
                    len_b -= 1;
                    if len_b == 0 {
                        break 'merge MergeTail::Rest;
                    }

                    let key = buffer[cursor_buf];
                    wins_b = gallop_left(&mut self.compare, self.items, &key, cursor_b, len_b, 0);
                    if wins_b > 0 {
                        self.items.copy_within(cursor_b..cursor_b + wins_b, dest);
                        dest += wins_b;
                        cursor_b += wins_b;
                        len_b -= wins_b;
                        if len_b == 0 {
                            break 'merge MergeTail::Rest;
                        }
                    }
                    self.items[dest] = buffer[cursor_buf];
                    dest += 1;
                    cursor_buf += 1;
                    len_a -= 1;
                    if len_a == 1 {
                        break 'merge MergeTail::Last;
                    }
                }

                min_gallop += 1;
                self.min_gallop = min_gallop;
            }
        };

        match tail {
            MergeTail::Rest => {
                if len_a > 0 {
                    self.items[dest..dest + len_a].copy_from_slice(&buffer[cursor_buf..cursor_buf + len_a]);
                }
            }
            MergeTail::Last => {
                self.items.copy_within(cursor_b..cursor_b + len_b, dest);
                self.items[dest + len_b] = buffer[cursor_buf];
            }
        }
    }

    /// Merge right to left, buffering run B
    ///
    /// Cursors may step one position before the start of their run, so they
    /// are signed.
    fn merge_high(&mut self, base_a: usize, mut len_a: usize, base_b: usize, mut len_b: usize) {
        let buffer: Vec<T> = self.items[base_b..base_b + len_b].to_vec();
        let mut dest = (base_b + len_b - 1) as isize;
        let mut cursor_buf = (len_b - 1) as isize;
        let mut cursor_a = (base_a + len_a - 1) as isize;

        self.items[dest as usize] = self.items[cursor_a as usize];
        dest -= 1;
        cursor_a -= 1;

        let tail = 'merge: {
            len_a -= 1;
            if len_a == 0 {
                break 'merge MergeTail::Rest;
            }
            if len_b == 1 {
                break 'merge MergeTail::Last;
            }

            let mut min_gallop = self.min_gallop;
            loop {
                let mut wins_a = 0;
                let mut wins_b = 0;

                loop {
                    if is_less(&mut self.compare, &buffer[cursor_buf as usize], &self.items[cursor_a as usize]) {
                        self.items[dest as usize] = self.items[cursor_a as usize];
                        dest -= 1;
                        cursor_a -= 1;
                        wins_a += 1;
                        wins_b = 0;
                        len_a -= 1;
                        if len_a == 0 {
                            break 'merge MergeTail::Rest;
                        }
                        if wins_a >= min_gallop {
                            break;
                        }
                    } else {
                        self.items[dest as usize] = buffer[cursor_buf as usize];
                        dest -= 1;
                        cursor_buf -= 1;
                        wins_b += 1;
                        wins_a = 0;
                        len_b -= 1;
                        if len_b == 1 {
                            break 'merge MergeTail::Last;
                        }
                        if wins_b >= min_gallop {
                            break;
                        }
                    }
                }

                min_gallop += 1;
                let mut first_pass = true;
                while first_pass || wins_a >= MIN_GALLOP || wins_b >= MIN_GALLOP {
                    first_pass = false;
                    min_gallop = min_gallop.saturating_sub(1).max(1);
                    self.min_gallop = min_gallop;

                    let key = buffer[cursor_buf as usize];
                    let k = gallop_right(&mut self.compare, self.items, &key, base_a, len_a, len_a - 1);
                    wins_a = len_a - k;
                    if wins_a > 0 {
                        dest -= wins_a as isize;
                        cursor_a -= wins_a as isize;
                        let (src, dst) = ((cursor_a + 1) as usize, (dest + 1) as usize);
                        self.items.copy_within(src..src + wins_a, dst);
                        len_a -= wins_a;
                        if len_a == 0 {
                            break 'merge MergeTail::Rest;
                        }
                    }
                    self.items[dest as usize] = buffer[cursor_buf as usize];
                    dest -= 1;
                    cursor_buf -= 1;
                    len_b -= 1;
                    if len_b == 1 {
                        break 'merge MergeTail::Last;
                    }

                    let key = self.items[cursor_a as usize];
                    let k = gallop_left(&mut self.compare, &buffer, &key, 0, len_b, len_b - 1);
                    wins_b = len_b - k;
                    if wins_b > 0 {
                        dest -= wins_b as isize;
                        cursor_buf -= wins_b as isize;
                        let (src, dst) = ((cursor_buf + 1) as usize, (dest + 1) as usize);
                        self.items[dst..dst + wins_b].copy_from_slice(&buffer[src..src + wins_b]);
                        len_b -= wins_b;
                        if len_b == 1 {
                            break 'merge MergeTail::Last;
                        }
                        if len_b == 0 {
                            break 'merge MergeTail::Rest;
                        }
                    }
                    self.items[dest as usize] = self.items[cursor_a as usize];
                    dest -= 1;
                    cursor_a -= 1;
                    len_a -= 1;
                    if len_a == 0 {
                        break 'merge MergeTail::Rest;
                    }
                }

                min_gallop += 1;
                self.min_gallop = min_gallop;
            }
        };

        match tail {
            MergeTail::Rest => {
                if len_b > 0 {
                    let start = (dest + 1) as usize - len_b;
                    self.items[start..start + len_b].copy_from_slice(&buffer[..len_b]);
                }
            }
            MergeTail::Last => {
                dest -= len_a as isize;
                cursor_a -= len_a as isize;
                let (src, dst) = ((cursor_a + 1) as usize, (dest + 1) as usize);
                self.items.copy_within(src..src + len_a, dst);
                self.items[dest as usize] = buffer[cursor_buf as usize];
            }
        }
    }
}

/// Leftmost insertion point for `key` in the sorted `items[base..base + len]`
///
/// Searches outward from `hint` in growing steps, then bisects.
fn gallop_left<T, F>(compare: &mut F, items: &[T], key: &T, base: usize, len: usize, hint: usize) -> usize
where
    F: FnMut(&T, &T) -> Ordering,
{
    let at = |offset: isize| &items[base + offset as usize];
    let (len, hint) = (len as isize, hint as isize);
    let mut last_ofs = 0;
    let mut offset = 1;

    if is_less(compare, at(hint), key) {
        let max_ofs = len - hint;
        while offset < max_ofs {
            if !is_less(compare, at(hint + offset), key) {
                break;
            }
            last_ofs = offset;
            offset = (offset << 1) + 1;
        }
        offset = offset.min(max_ofs);
        last_ofs += hint;
        offset += hint;
    } else {
        let max_ofs = hint + 1;
        while offset < max_ofs {
            if is_less(compare, at(hint - offset), key) {
                break;
            }
            last_ofs = offset;
            offset = (offset << 1) + 1;
        }
        offset = offset.min(max_ofs);
        (last_ofs, offset) = (hint - offset, hint - last_ofs);
    }

    last_ofs += 1;
    while last_ofs < offset {
        let mid = last_ofs + ((offset - last_ofs) >> 1);
        if is_less(compare, at(mid), key) {
            last_ofs = mid + 1;
        } else {
            offset = mid;
        }
    }
    offset as usize
}

/// Rightmost insertion point for `key` in the sorted `items[base..base + len]`
fn gallop_right<T, F>(compare: &mut F, items: &[T], key: &T, base: usize, len: usize, hint: usize) -> usize
where
    F: FnMut(&T, &T) -> Ordering,
{
    let at = |offset: isize| &items[base + offset as usize];
    let (len, hint) = (len as isize, hint as isize);
    let mut last_ofs = 0;
    let mut offset = 1;

    if is_less(compare, key, at(hint)) {
        let max_ofs = hint + 1;
        while offset < max_ofs {
            if !is_less(compare, key, at(hint - offset)) {
                break;
            }
            last_ofs = offset;
            offset = (offset << 1) + 1;
        }
        offset = offset.min(max_ofs);
        (last_ofs, offset) = (hint - offset, hint - last_ofs);
    } else {
        let max_ofs = len - hint;
        while offset < max_ofs {
            if is_less(compare, key, at(hint + offset)) {
                break;
            }
            last_ofs = offset;
            offset = (offset << 1) + 1;
        }
        offset = offset.min(max_ofs);
        last_ofs += hint;
        offset += hint;
    }

    last_ofs += 1;
    while last_ofs < offset {
        let mid = last_ofs + ((offset - last_ofs) >> 1);
        if is_less(compare, key, at(mid)) {
            offset = mid;
        } else {
            last_ofs = mid + 1;
        }
    }
    offset as usize
}
