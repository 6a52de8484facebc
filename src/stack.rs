use crate::error::*;

/// Fixed capacity LIFO.
#[derive(Debug, Clone)]
pub struct Stack<T> {
    data: Vec<T>,
    capacity: usize,
}

impl<T: Copy> Stack<T> {
    pub fn new(capacity: usize) -> Self {
        Self {
            data: Vec::with_capacity(capacity),
            capacity,
        }
    }

    pub fn push(&mut self, val: T) -> Xresult {
        if self.data.len() >= self.capacity {
            return Err(Xerr::StackOverflow);
        }
        self.data.push(val);
        OK
    }

    pub fn pop(&mut self) -> Xresult1<T> {
        self.data.pop().ok_or(Xerr::StackUnderflow)
    }

    pub fn top(&self) -> Option<T> {
        self.data.last().copied()
    }

    /// Nth item counting from the top.
    pub fn get(&self, idx: usize) -> Option<T> {
        self.data.iter().rev().nth(idx).copied()
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn clear(&mut self) {
        self.data.clear();
    }

    /// Bottom to top.
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }
}
