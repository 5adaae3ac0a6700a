//! What to re-read after a mutation succeeds.
//!
//! The controller never patches server snapshots locally. A successful write
//! is followed by the reads listed here, nothing more.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReadTask {
    Feed,
    Stats,
    Leaderboard,
    Algorithm,
    Credits,
    Comments,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MutationKind {
    FeedbackCreated,
    VoteCast,
    CommentAdded,
}

/// Reads issued when a dashboard mounts.
pub const MOUNT_READS: &[ReadTask] = &[
    ReadTask::Feed,
    ReadTask::Stats,
    ReadTask::Leaderboard,
    ReadTask::Algorithm,
    ReadTask::Credits,
];

pub fn refetch_plan(kind: MutationKind) -> &'static [ReadTask] {
    match kind {
        MutationKind::FeedbackCreated => &[ReadTask::Feed, ReadTask::Stats, ReadTask::Credits],
        MutationKind::VoteCast => &[ReadTask::Feed],
        MutationKind::CommentAdded => &[ReadTask::Comments, ReadTask::Feed],
    }
}
