pub use self::{app::App, frame_clock::FrameClock, runtime::Runtime};

mod app;
mod event_loop;
mod frame_clock;
mod runtime;
