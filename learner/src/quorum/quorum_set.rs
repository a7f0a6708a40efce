/// A set of quorums, e.g. the majority quorum set of `{a,b,c}` is
/// `{a,b}, {b,c}, {a,c}`.
pub(crate) trait QuorumSet<ID: 'static> {
    /// Check if a series of distinct ids constitute a quorum defined by this
    /// quorum set.
    fn is_quorum<'a, I: Iterator<Item = &'a ID>>(&self, ids: I) -> bool;
}
