use crate::error::TreeError;

pub trait TreeOps<T> {
    fn add(&mut self, value: T) -> bool;
    fn contains(&self, value: &T) -> bool;
    fn remove(&mut self, value: &T) -> bool;
    fn find_maximum(&self) -> Result<&T, TreeError>;
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
