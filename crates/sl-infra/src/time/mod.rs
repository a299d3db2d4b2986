mod countdown;

pub use countdown::TickingCountdown;
