//! # Reactive cells
//!
//! A reactive cell is a broadcast value holder with replay-latest delivery:
//! every new subscriber first receives the most recently written value, then
//! each later write.
//!
//! Ownership is split on purpose:
//!
//! - [`ReactiveCell`] is the writer. It is not `Clone`, so one owner decides
//!   what the cell holds.
//! - [`CellReader`] is a read-only handle that can be cloned freely and given
//!   to any number of consumers.
//!
//! A cell starts as [`CellValue::Unset`]. Readers must accept `Unset` as a
//! normal transient state and never assume a value exists when they subscribe.

use tokio::sync::watch;

/// Current content of a reactive cell.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CellValue<T> {
    #[default]
    Unset,
    Set(T),
}

impl<T> CellValue<T> {
    pub fn is_set(&self) -> bool {
        matches!(self, CellValue::Set(_))
    }

    pub fn is_unset(&self) -> bool {
        !self.is_set()
    }

    pub fn as_ref(&self) -> CellValue<&T> {
        match self {
            CellValue::Unset => CellValue::Unset,
            CellValue::Set(value) => CellValue::Set(value),
        }
    }

    pub fn into_option(self) -> Option<T> {
        match self {
            CellValue::Unset => None,
            CellValue::Set(value) => Some(value),
        }
    }
}

impl<T> From<Option<T>> for CellValue<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(value) => CellValue::Set(value),
            None => CellValue::Unset,
        }
    }
}

/// Writer half of a reactive cell.
#[derive(Debug)]
pub struct ReactiveCell<T> {
    tx: watch::Sender<CellValue<T>>,
}

impl<T: Clone> ReactiveCell<T> {
    /// Create an unset cell.
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(CellValue::Unset);
        Self { tx }
    }

    /// Publish a value to every current and future reader.
    ///
    /// Succeeds even when nobody is subscribed yet.
    pub fn set(&self, value: T) {
        self.tx.send_replace(CellValue::Set(value));
    }

    /// Return the cell to `Unset`.
    pub fn clear(&self) {
        self.tx.send_replace(CellValue::Unset);
    }

    /// Write an optional value, `None` clears the cell.
    pub fn replace(&self, value: Option<T>) {
        self.tx.send_replace(CellValue::from(value));
    }

    pub fn get(&self) -> CellValue<T> {
        self.tx.borrow().clone()
    }

    /// Hand out a read-only view of this cell.
    pub fn reader(&self) -> CellReader<T> {
        CellReader {
            rx: self.tx.subscribe(),
        }
    }

    pub fn reader_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl<T: Clone> Default for ReactiveCell<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Read-only view of a reactive cell.
#[derive(Debug, Clone)]
pub struct CellReader<T> {
    rx: watch::Receiver<CellValue<T>>,
}

impl<T: Clone> CellReader<T> {
    /// Latest value, `Unset` included.
    pub fn get(&self) -> CellValue<T> {
        self.rx.borrow().clone()
    }

    /// Latest value as an `Option`.
    pub fn value(&self) -> Option<T> {
        self.get().into_option()
    }

    /// Start a subscription that replays the latest value first.
    pub fn subscribe(&self) -> CellSubscription<T> {
        CellSubscription {
            rx: self.rx.clone(),
            primed: false,
        }
    }
}

/// A stream of cell values for one observer.
#[derive(Debug)]
pub struct CellSubscription<T> {
    rx: watch::Receiver<CellValue<T>>,
    primed: bool,
}

impl<T: Clone> CellSubscription<T> {
    /// Next value for this observer.
    ///
    /// The first call resolves immediately with the latest value. Later calls
    /// wait for a write; writes that land between two calls coalesce into the
    /// newest one. Returns `None` once the writer is gone.
    pub async fn next(&mut self) -> Option<CellValue<T>> {
        if !self.primed {
            self.primed = true;
            return Some(self.rx.borrow_and_update().clone());
        }

        self.rx.changed().await.ok()?;
        Some(self.rx.borrow_and_update().clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn new_cell_is_unset() {
        let cell: ReactiveCell<String> = ReactiveCell::new();
        assert_eq!(cell.get(), CellValue::Unset);
        assert_eq!(cell.reader().get(), CellValue::Unset);
    }

    #[test]
    fn set_without_readers_is_kept() {
        let cell = ReactiveCell::new();
        cell.set(7u32);

        assert_eq!(cell.reader_count(), 0);
        assert_eq!(cell.get(), CellValue::Set(7));
        assert_eq!(cell.reader().value(), Some(7));
    }

    #[test]
    fn clear_and_replace() {
        let cell = ReactiveCell::new();
        cell.set("a".to_string());
        cell.clear();
        assert!(cell.get().is_unset());

        cell.replace(Some("b".to_string()));
        assert_eq!(cell.get(), CellValue::Set("b".to_string()));

        cell.replace(None);
        assert!(cell.get().is_unset());
    }

    #[test]
    fn readers_share_the_writer_value() {
        let cell = ReactiveCell::new();
        let early = cell.reader();
        cell.set(1u8);
        let late = cell.reader();
        let cloned = early.clone();

        assert_eq!(early.value(), Some(1));
        assert_eq!(late.value(), Some(1));
        assert_eq!(cloned.value(), Some(1));
        assert_eq!(cell.reader_count(), 3);
    }

    #[tokio::test]
    async fn subscription_replays_unset_before_any_write() {
        let cell: ReactiveCell<String> = ReactiveCell::new();
        let mut sub = cell.reader().subscribe();

        assert_eq!(sub.next().await, Some(CellValue::Unset));
    }

    #[tokio::test]
    async fn late_subscriber_receives_latest_value_immediately() {
        let cell = ReactiveCell::new();
        cell.set("https://example.com/repo.git".to_string());

        let mut sub = cell.reader().subscribe();
        let first = tokio::time::timeout(Duration::from_millis(100), sub.next())
            .await
            .expect("replay must not wait for a write");

        assert_eq!(
            first,
            Some(CellValue::Set("https://example.com/repo.git".to_string()))
        );
    }

    #[tokio::test]
    async fn subscription_sees_later_writes() {
        let cell = ReactiveCell::new();
        let mut sub = cell.reader().subscribe();
        assert_eq!(sub.next().await, Some(CellValue::Unset));

        cell.set(10u32);
        assert_eq!(sub.next().await, Some(CellValue::Set(10)));

        cell.clear();
        assert_eq!(sub.next().await, Some(CellValue::Unset));
    }

    #[tokio::test]
    async fn subscription_waits_for_next_write() {
        let cell = ReactiveCell::new();
        cell.set(1u32);
        let mut sub = cell.reader().subscribe();
        assert_eq!(sub.next().await, Some(CellValue::Set(1)));

        let pending = tokio::time::timeout(Duration::from_millis(20), sub.next()).await;
        assert!(pending.is_err(), "no write happened, next() must wait");
    }

    #[tokio::test]
    async fn subscription_ends_when_writer_dropped() {
        let cell = ReactiveCell::new();
        cell.set(1u32);
        let mut sub = cell.reader().subscribe();
        assert_eq!(sub.next().await, Some(CellValue::Set(1)));

        drop(cell);
        assert_eq!(sub.next().await, None);
    }

    #[test]
    fn cell_value_conversions() {
        assert_eq!(CellValue::from(Some(3)), CellValue::Set(3));
        assert_eq!(CellValue::<i32>::from(None), CellValue::Unset);
        assert_eq!(CellValue::Set(3).into_option(), Some(3));
        assert_eq!(CellValue::Set(3).as_ref(), CellValue::Set(&3));
        assert!(CellValue::<i32>::default().is_unset());
    }
}
