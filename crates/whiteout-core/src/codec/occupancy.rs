/// Tracks the pixels claimed by the header within one operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OccupancyMap {
    taken: Vec<bool>,
}

impl OccupancyMap {
    pub fn new(len: usize) -> Self {
        Self {
            taken: vec![false; len],
        }
    }

    pub fn from_indices(len: usize, indices: &[usize]) -> Self {
        let mut map = Self::new(len);
        indices.iter().for_each(|&i| map.mark(i));
        map
    }

    #[inline]
    pub fn mark(&mut self, index: usize) {
        self.taken[index] = true;
    }

    #[inline]
    pub fn is_taken(&self, index: usize) -> bool {
        self.taken[index]
    }

    pub fn count(&self) -> usize {
        self.taken.iter().filter(|&&t| t).count()
    }

    pub fn len(&self) -> usize {
        self.taken.len()
    }

    pub fn is_empty(&self) -> bool {
        self.taken.is_empty()
    }
}
