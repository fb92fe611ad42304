pub mod app;
mod burst;
mod celebration;
mod celebration_view;
mod dialogs;
mod drift;
mod drift_view;
mod evasion;
mod feedback;
mod motion;
mod proposal;
mod proposal_view;
mod scene;
mod state;
mod theme;
mod timers;
