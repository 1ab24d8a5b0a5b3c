use crate::structs::scheduled_timer::ScheduledTimer;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlapState {
    Settled(String),
    Transitioning {
        from: String,
        to: String,
        timer: ScheduledTimer,
    },
}
