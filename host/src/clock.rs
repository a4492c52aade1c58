use civic_types::BlockHeight;

/// Source of the current block height.
pub trait Clock: Send + Sync {
    fn current_block(&self) -> BlockHeight;
}
