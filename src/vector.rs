//!
//! `Vector` Wrapper of fixed size table
//!
//! Dense table whose index is typed, so that a table for nodes
//! cannot be indexed by an edge by mistake.
//!
//! i.e. `vec[NodeIndex(0)]`
//!
pub use petgraph::graph::{EdgeIndex, NodeIndex};
use std::marker::PhantomData;
use std::ops::{Index, IndexMut};

///
/// Abstraction of types that can be used as an index of vector
///
pub trait Indexable: Copy {
    fn new(x: usize) -> Self;
    fn index(&self) -> usize;
}

impl Indexable for usize {
    #[inline]
    fn new(x: usize) -> Self {
        x
    }
    #[inline]
    fn index(&self) -> usize {
        *self
    }
}

impl Indexable for NodeIndex {
    #[inline]
    fn new(x: usize) -> Self {
        NodeIndex::new(x)
    }
    #[inline]
    fn index(&self) -> usize {
        NodeIndex::index(*self)
    }
}

impl Indexable for EdgeIndex {
    #[inline]
    fn new(x: usize) -> Self {
        EdgeIndex::new(x)
    }
    #[inline]
    fn index(&self) -> usize {
        EdgeIndex::index(*self)
    }
}

/// `Vector` struct
///
/// fixed size `std::Vec` with index type `Ix: Indexable`
///
#[derive(Clone, Debug, PartialEq)]
pub struct Vector<T, Ix: Indexable = usize> {
    /// Backend storage of the Vector
    storage: Vec<T>,
    /// Hidden marker of index type
    ty: PhantomData<Ix>,
}

/// Vector that supports index access by petgraph::NodeIndex
pub type NodeVec<T> = Vector<T, NodeIndex>;

/// Vector that supports index access by petgraph::EdgeIndex
pub type EdgeVec<T> = Vector<T, EdgeIndex>;

impl<T: Clone, Ix: Indexable> Vector<T, Ix> {
    /// Create a new Vector, with fixed size and filled by default_value.
    pub fn new(size: usize, default_value: T) -> Vector<T, Ix> {
        Vector {
            storage: vec![default_value; size],
            ty: PhantomData,
        }
    }
}

impl<T, Ix: Indexable> Vector<T, Ix> {
    /// Create from a `Vec` whose i-th element is the value of index i.
    pub fn from_vec(storage: Vec<T>) -> Vector<T, Ix> {
        Vector {
            storage,
            ty: PhantomData,
        }
    }
    /// Get the size of the vector
    pub fn len(&self) -> usize {
        self.storage.len()
    }
    pub fn is_empty(&self) -> bool {
        self.storage.is_empty()
    }
    /// Get an iterator on (index, &item).
    pub fn iter<'a>(&'a self) -> impl 'a + Iterator<Item = (Ix, &'a T)> {
        self.storage
            .iter()
            .enumerate()
            .map(|(i, v)| (Ix::new(i), v))
    }
    /// Reference of the raw storage
    pub fn as_slice(&self) -> &[T] {
        &self.storage
    }
}

/// Implement index access, vec[i]
impl<T, Ix: Indexable> Index<Ix> for Vector<T, Ix> {
    type Output = T;
    fn index(&self, index: Ix) -> &Self::Output {
        &self.storage[index.index()]
    }
}

/// Implement index write access, vec[i] = 10
impl<T, Ix: Indexable> IndexMut<Ix> for Vector<T, Ix> {
    fn index_mut(&mut self, index: Ix) -> &mut Self::Output {
        &mut self.storage[index.index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nodevec() {
        let mut v: NodeVec<u32> = NodeVec::new(5, 0);
        v[NodeIndex::new(1)] = 100;
        assert_eq!(v.len(), 5);
        assert_eq!(v[NodeIndex::new(0)], 0);
        assert_eq!(v[NodeIndex::new(1)], 100);
        let w: Vec<(NodeIndex, u32)> = v.iter().map(|(i, &x)| (i, x)).collect();
        assert_eq!(
            w,
            vec![
                (NodeIndex::new(0), 0),
                (NodeIndex::new(1), 100),
                (NodeIndex::new(2), 0),
                (NodeIndex::new(3), 0),
                (NodeIndex::new(4), 0),
            ]
        );
    }
    #[test]
    fn edgevec_of_options() {
        let mut v: EdgeVec<Option<usize>> = EdgeVec::new(3, None);
        v[EdgeIndex::new(2)] = Some(7);
        assert_eq!(v[EdgeIndex::new(0)], None);
        assert_eq!(v[EdgeIndex::new(2)], Some(7));
        assert_eq!(v.as_slice(), &[None, None, Some(7)]);
    }
    #[test]
    #[should_panic]
    fn vector_outside() {
        let mut v: Vector<u32> = Vector::new(3, 0);
        v[3] = 22;
    }
}
