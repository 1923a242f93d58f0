use std::fmt::Debug;

use dynamic_forest::seq::{Idx, Sequences};

const GONE: usize = usize::MAX;

#[derive(Debug)]
struct Entry<T> {
    idx: Idx,
    data: T,
}

/// Reference implementation where most operations take linear time.
pub struct SlowSeqs<T: Debug> {
    seqs: Vec<Vec<Entry<T>>>,
    u_to_seq: Vec<usize>,
    live: usize,
}

impl<T: Debug> Debug for SlowSeqs<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SlowSeqs:")?;
        for s in &self.seqs {
            if !s.is_empty() {
                write!(f, " [")?;
                for e in s {
                    write!(f, "{}({:?}) ", e.idx, e.data)?;
                }
                write!(f, "]")?;
            }
        }
        Ok(())
    }
}

impl<T: Debug> SlowSeqs<T> {
    fn seq(&self, u: Idx) -> &Vec<Entry<T>> {
        if u == Self::EMPTY {
            // sentinel, always empty
            &self.seqs[0]
        } else {
            &self.seqs[self.u_to_seq[u]]
        }
    }
    fn entry(&self, u: Idx) -> &Entry<T> {
        self.seq(u).iter().find(|e| e.idx == u).unwrap()
    }
    fn first_of(&self, s: usize) -> Idx {
        self.seqs[s].first().map_or(Self::EMPTY, |e| e.idx)
    }
}

impl<T: Debug> Sequences<T> for SlowSeqs<T> {
    fn with_seed(capacity: usize, _seed: u64) -> Self {
        let mut seqs = Vec::with_capacity(capacity + 1);
        seqs.push(vec![]);
        Self {
            seqs,
            u_to_seq: Vec::with_capacity(capacity),
            live: 0,
        }
    }

    fn create(&mut self, data: T) -> Idx {
        let idx = self.u_to_seq.len();
        self.seqs.push(vec![Entry { idx, data }]);
        self.u_to_seq.push(self.seqs.len() - 1);
        self.live += 1;
        idx
    }

    fn remove(&mut self, u: Idx) {
        let s = self.u_to_seq[u];
        assert_eq!(self.seqs[s].len(), 1, "removed token must be detached");
        self.seqs[s].clear();
        self.u_to_seq[u] = GONE;
        self.live -= 1;
    }

    fn total_size(&self) -> usize {
        self.live
    }

    fn data(&self, u: Idx) -> &T {
        &self.entry(u).data
    }

    fn root(&self, u: Idx) -> Idx {
        if u == Self::EMPTY {
            return Self::EMPTY;
        }
        self.seq(u)[0].idx
    }

    fn order(&self, u: Idx) -> usize {
        self.seq(u).iter().position(|e| e.idx == u).unwrap()
    }

    fn len(&self, u: Idx) -> usize {
        self.seq(u).len()
    }

    fn find_kth(&self, u: Idx, k: usize) -> Idx {
        self.seq(u).get(k).map_or(Self::EMPTY, |e| e.idx)
    }

    fn concat(&mut self, u: Idx, v: Idx) -> Idx {
        if v == Self::EMPTY || (u != Self::EMPTY && self.on_same_seq(u, v)) {
            return self.root(u);
        }
        if u == Self::EMPTY {
            return self.root(v);
        }
        let su = self.u_to_seq[u];
        let sv = self.u_to_seq[v];
        let mut moved = std::mem::take(&mut self.seqs[sv]);
        for e in moved.iter() {
            self.u_to_seq[e.idx] = su;
        }
        self.seqs[su].append(&mut moved);
        self.first_of(su)
    }

    fn split_at(&mut self, u: Idx, k: usize) -> (Idx, Idx) {
        if u == Self::EMPTY {
            return (Self::EMPTY, Self::EMPTY);
        }
        let su = self.u_to_seq[u];
        let k = k.min(self.seqs[su].len());
        let right: Vec<_> = self.seqs[su].drain(k..).collect();
        let sr = self.seqs.len();
        for e in right.iter() {
            self.u_to_seq[e.idx] = sr;
        }
        self.seqs.push(right);
        (self.first_of(su), self.first_of(sr))
    }
}
