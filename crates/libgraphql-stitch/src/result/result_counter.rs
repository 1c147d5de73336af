/// Totals carried by every [`ResultNode`](crate::result::ResultNode) for its
/// subtree.
///
/// `type_rename_count` is signed: a hydrated list pre-pays one type rename
/// per element with a negative offset that is balanced once each element's
/// hydrated value is stitched in.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    Eq,
    PartialEq,
    serde::Deserialize,
    serde::Serialize,
)]
pub struct ResultCounters {
    pub node_count: usize,
    pub field_rename_count: usize,
    pub type_rename_count: i64,
}
impl std::ops::Add for ResultCounters {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self {
            node_count: self.node_count + rhs.node_count,
            field_rename_count: self.field_rename_count + rhs.field_rename_count,
            type_rename_count: self.type_rename_count + rhs.type_rename_count,
        }
    }
}
impl std::iter::Sum for ResultCounters {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::default(), |acc, counters| acc + counters)
    }
}

/// The running accumulator shared by one conversion call chain.
///
/// A fresh counter is created per `convert`/`convert_children` call and is
/// passed by `&mut` through the recursion; nothing else ever observes it.
#[derive(Debug, Default)]
pub struct ResultCounter {
    counters: ResultCounters,
}
impl ResultCounter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn decrement_node_count(&mut self) {
        self.counters.node_count = self.counters.node_count.saturating_sub(1);
    }

    pub fn field_rename_count(&self) -> usize {
        self.counters.field_rename_count
    }

    pub fn increment_field_rename_count(&mut self, amount: usize) {
        self.counters.field_rename_count += amount;
    }

    pub fn increment_node_count(&mut self) {
        self.increment_node_count_by(1);
    }

    pub fn increment_node_count_by(&mut self, amount: usize) {
        self.counters.node_count += amount;
    }

    pub fn increment_type_rename_count(&mut self, amount: i64) {
        self.counters.type_rename_count += amount;
    }

    pub fn node_count(&self) -> usize {
        self.counters.node_count
    }

    pub fn snapshot(&self) -> ResultCounters {
        self.counters
    }

    pub fn type_rename_count(&self) -> i64 {
        self.counters.type_rename_count
    }
}
