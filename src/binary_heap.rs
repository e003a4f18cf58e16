//! A binary min-heap that tracks where every element lives so that its score can be changed
//! in place ("rescore", also known as decrease-key).
//!
//! Unlike [std::collections::BinaryHeap], an element is stored at most once. Improving the score
//! of an element that is already queued repositions it instead of pushing a second copy, so the
//! popped element never has to be checked for staleness.
use fxhash::FxHashMap;
use std::hash::Hash;

#[derive(Clone, Debug)]
struct Entry<T, S> {
    item: T,
    score: S,
}

/// Min-heap of `T` ordered by a score `S`, lower is more urgent.
#[derive(Clone, Debug)]
pub struct PriorityQueue<T, S> {
    content: Vec<Entry<T, S>>,
    positions: FxHashMap<T, usize>,
}

impl<T, S> Default for PriorityQueue<T, S>
where
    T: Copy + Eq + Hash,
    S: PartialOrd + Copy,
{
    fn default() -> Self {
        PriorityQueue::new()
    }
}

impl<T, S> PriorityQueue<T, S>
where
    T: Copy + Eq + Hash,
    S: PartialOrd + Copy,
{
    pub fn new() -> Self {
        PriorityQueue {
            content: Vec::new(),
            positions: FxHashMap::default(),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        PriorityQueue {
            content: Vec::with_capacity(capacity),
            positions: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
        }
    }

    /// Inserts `item` with the given score. If the item is already queued its score is replaced
    /// instead, so the queue never holds two slots for one element.
    ///
    /// The queue orders by the score it stores, not by the item: `score` must be the caller's
    /// current key for `item`, and every later change of that key has to go through
    /// [rescore](Self::rescore) or another `push`.
    pub fn push(&mut self, item: T, score: S) {
        if self.positions.contains_key(&item) {
            self.rescore(&item, score);
            return;
        }
        let ix = self.content.len();
        self.content.push(Entry { item, score });
        self.positions.insert(item, ix);
        self.sift_up(ix);
    }

    /// Removes and returns the element with the smallest score.
    pub fn pop_min(&mut self) -> Option<T> {
        self.pop_min_with_score().map(|(item, _)| item)
    }

    pub fn pop_min_with_score(&mut self) -> Option<(T, S)> {
        let last = self.content.len().checked_sub(1)?;
        self.swap(0, last);
        let Entry { item, score } = self.content.pop()?;
        self.positions.remove(&item);
        if !self.content.is_empty() {
            self.sift_down(0);
        }
        Some((item, score))
    }

    pub fn peek(&self) -> Option<(&T, &S)> {
        self.content.first().map(|e| (&e.item, &e.score))
    }

    /// Changes the score of a queued element and restores the heap order around it, moving it up
    /// if the score dropped and down if it grew. Returns `false` if the element is not queued.
    ///
    /// `score` must be the caller's new key for `item`; the heap order is only valid while every
    /// stored score matches the key it stands for.
    pub fn rescore(&mut self, item: &T, score: S) -> bool {
        let Some(&ix) = self.positions.get(item) else {
            return false;
        };
        let old = self.content[ix].score;
        self.content[ix].score = score;
        if score < old {
            self.sift_up(ix);
        } else {
            self.sift_down(ix);
        }
        true
    }

    pub fn contains(&self, item: &T) -> bool {
        self.positions.contains_key(item)
    }

    pub fn score(&self, item: &T) -> Option<S> {
        self.positions.get(item).map(|&ix| self.content[ix].score)
    }

    pub fn len(&self) -> usize {
        self.content.len()
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    pub fn clear(&mut self) {
        self.content.clear();
        self.positions.clear();
    }

    fn swap(&mut self, a: usize, b: usize) {
        if a == b {
            return;
        }
        self.content.swap(a, b);
        self.positions.insert(self.content[a].item, a);
        self.positions.insert(self.content[b].item, b);
    }

    fn sift_up(&mut self, mut ix: usize) {
        while ix > 0 {
            let parent = (ix - 1) / 2;
            if self.content[ix].score < self.content[parent].score {
                self.swap(ix, parent);
                ix = parent;
            } else {
                break;
            }
        }
    }

    fn sift_down(&mut self, mut ix: usize) {
        let len = self.content.len();
        loop {
            let left = 2 * ix + 1;
            let right = left + 1;
            let mut smallest = ix;
            if left < len && self.content[left].score < self.content[smallest].score {
                smallest = left;
            }
            if right < len && self.content[right].score < self.content[smallest].score {
                smallest = right;
            }
            if smallest == ix {
                break;
            }
            self.swap(ix, smallest);
            ix = smallest;
        }
    }

    #[cfg(test)]
    fn assert_heap(&self) {
        for (ix, entry) in self.content.iter().enumerate() {
            assert_eq!(self.positions[&entry.item], ix);
            if ix > 0 {
                assert!(self.content[(ix - 1) / 2].score <= entry.score);
            }
        }
        assert_eq!(self.positions.len(), self.content.len());
    }
}
