/// Flat node storage. Children refer to each other by index instead of
/// owning pointers, so dropping a deep tree never recurses.
pub struct Arena<T> {
    data: Vec<T>,
}

impl<T> Arena<T> {
    pub fn with_capacity(n: usize) -> Self {
        Self {
            data: Vec::with_capacity(n),
        }
    }

    pub fn alloc(&mut self, t: T) -> usize {
        let offset = self.data.len();
        self.data.push(t);
        offset
    }

    pub fn get(&self, offset: usize) -> &T {
        &self.data[offset]
    }

    pub fn get_mut(&mut self, offset: usize) -> &mut T {
        &mut self.data[offset]
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}
