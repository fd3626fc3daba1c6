use std::fmt::{self, Debug};
use std::iter;
use std::sync::atomic::{AtomicU64, Ordering};
use thiserror::Error;

static NEXT_LIST_ID: AtomicU64 = AtomicU64::new(0);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum LinkedListError {
    #[error("element handle does not belong to this list")]
    InvalidElementHandle,
}

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct ElementHandle {
    list: u64,
    index: usize,
}

#[derive(Debug)]
struct Element<T> {
    value: T,
    prev: Option<usize>,
    next: Option<usize>,
}

pub struct LinkedList<T> {
    // handles carry this id
    id: u64,
    elements: Vec<Element<T>>,
    head: Option<usize>,
    tail: Option<usize>,
}

impl<T> LinkedList<T> {
    pub fn new() -> Self {
        LinkedList { id: NEXT_LIST_ID.fetch_add(1, Ordering::Relaxed), elements: Vec::new(), head: None, tail: None }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn add(&mut self, value: T) -> ElementHandle {
        let index = self.elements.len();
        self.elements.push(Element { value, prev: self.tail, next: None });
        match self.tail {
            Some(tail) => self.elements[tail].next = Some(index),
            None => self.head = Some(index),
        }
        self.tail = Some(index);
        self.handle(index)
    }

    pub fn move_to_front(&mut self, element: ElementHandle) -> Result<(), LinkedListError> {
        let index = self.index_of(element)?;
        if self.head == Some(index) {
            return Ok(());
        }

        let (prev, next) = (self.elements[index].prev, self.elements[index].next);
        // not the head, so there is a predecessor
        if let Some(prev) = prev {
            self.elements[prev].next = next;
        }
        match next {
            Some(next) => self.elements[next].prev = prev,
            None => self.tail = prev,
        }

        if let Some(head) = self.head {
            self.elements[head].prev = Some(index);
        }
        self.elements[index].prev = None;
        self.elements[index].next = self.head;
        self.head = Some(index);
        Ok(())
    }

    pub fn contains(&self, element: ElementHandle) -> bool {
        self.index_of(element).is_ok()
    }

    pub fn head(&self) -> Option<ElementHandle> {
        self.head.map(|i| self.handle(i))
    }

    pub fn tail(&self) -> Option<ElementHandle> {
        self.tail.map(|i| self.handle(i))
    }

    pub fn next(&self, element: ElementHandle) -> Result<Option<ElementHandle>, LinkedListError> {
        let index = self.index_of(element)?;
        Ok(self.elements[index].next.map(|i| self.handle(i)))
    }

    pub fn prev(&self, element: ElementHandle) -> Result<Option<ElementHandle>, LinkedListError> {
        let index = self.index_of(element)?;
        Ok(self.elements[index].prev.map(|i| self.handle(i)))
    }

    pub fn get(&self, element: ElementHandle) -> Result<&T, LinkedListError> {
        let index = self.index_of(element)?;
        Ok(&self.elements[index].value)
    }

    pub fn get_mut(&mut self, element: ElementHandle) -> Result<&mut T, LinkedListError> {
        let index = self.index_of(element)?;
        Ok(&mut self.elements[index].value)
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        let mut cursor = self.head;
        iter::from_fn(move || {
            let element = &self.elements[cursor?];
            cursor = element.next;
            Some(&element.value)
        })
    }

    pub fn iter_rev(&self) -> impl Iterator<Item = &T> {
        let mut cursor = self.tail;
        iter::from_fn(move || {
            let element = &self.elements[cursor?];
            cursor = element.prev;
            Some(&element.value)
        })
    }

    fn handle(&self, index: usize) -> ElementHandle {
        ElementHandle { list: self.id, index }
    }

    fn index_of(&self, element: ElementHandle) -> Result<usize, LinkedListError> {
        if element.list != self.id || element.index >= self.elements.len() {
            return Err(LinkedListError::InvalidElementHandle);
        }
        Ok(element.index)
    }
}

impl<T> Default for LinkedList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Extend<T> for LinkedList<T> {
    fn extend<I>(&mut self, iter: I)
    where
        I: IntoIterator<Item = T>,
    {
        for value in iter {
            self.add(value);
        }
    }
}

impl<T> FromIterator<T> for LinkedList<T> {
    fn from_iter<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        let mut list = Self::new();
        list.extend(iter);
        list
    }
}

impl<T> Debug for LinkedList<T>
where
    T: Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}
