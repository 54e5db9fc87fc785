use crate::models::{Post, PostId};

/// A speculative change that can be undone.
///
/// [`Optimistic::apply`] snapshots the current value and mutates it in place.
/// When the server answers, either [`commit`](Optimistic::commit) (keep the
/// speculative value) or [`rollback`](Optimistic::rollback) (restore the
/// snapshot exactly as it was).
#[must_use = "an optimistic change must be committed or rolled back"]
#[derive(Debug)]
pub(crate) struct Optimistic<T> {
    snapshot: T,
}

impl<T: Clone> Optimistic<T> {
    pub fn apply(current: &mut T, change: impl FnOnce(&mut T)) -> Self {
        let snapshot = current.clone();
        change(current);
        Self { snapshot }
    }

    pub fn commit(self) {}

    pub fn rollback(self, current: &mut T) {
        *current = self.snapshot;
    }

    /// Commits on `Ok`, rolls back on `Err`.
    pub fn settle<R, E>(self, current: &mut T, outcome: &Result<R, E>) {
        match outcome {
            Ok(_) => self.commit(),
            Err(_) => self.rollback(current),
        }
    }

    /// Like [`settle`](Optimistic::settle), but leaves `current` alone when it was
    /// replaced wholesale after `apply`; the snapshot no longer describes it.
    pub fn settle_unless_replaced<R, E>(self, current: &mut T, outcome: &Result<R, E>, replaced: bool) {
        if replaced {
            return;
        }
        self.settle(current, outcome);
    }

    #[cfg(test)]
    pub fn snapshot(&self) -> &T {
        &self.snapshot
    }
}

pub(crate) fn remove_post(posts: &mut Vec<Post>, id: PostId) {
    posts.retain(|p| p.id != id);
}
