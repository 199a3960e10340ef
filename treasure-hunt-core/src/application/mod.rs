mod approval;
mod commands;
mod event_loop;
mod events;
mod propagation;

pub use approval::{ReviewOutcome, UnlockReview};
pub use commands::QuestCommand;
pub use event_loop::QuestEventLoop;
pub use events::QuestEvent;
pub use propagation::{
    sync_quest_state, PropagationEngine, PropagationReport, SyncOutcome, UserSync,
};
