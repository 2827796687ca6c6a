//! Runtime - tokio spawner for native hosts
//!
//! The picker state is `!Send`, so refreshes run as local tasks. The host drives them
//! inside a `tokio::task::LocalSet`.

use futures::future::LocalBoxFuture;

use crate::controller::Spawner;

/// Spawns refresh tasks onto the current `LocalSet`
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioSpawner;

impl TokioSpawner {
    pub fn new() -> Self { Self }
}

impl Spawner for TokioSpawner {
    /// Must be called from within `LocalSet::run_until` / `LocalSet::block_on`
    fn spawn(&self, task: LocalBoxFuture<'static, ()>) {
        tokio::task::spawn_local(task);
    }
}
