//! # quiz-client
//!
//! Client library for the zimble trivia game service.
//!
//! This is the library a presentation surface (terminal, GUI, test harness)
//! uses to play a game.
//!
//! ## Features
//!
//! - **Transport Abstraction**: Pluggable transport layer (HTTP, mock)
//! - **Uniform Failure Reporting**: Every failed call is shown to the player once
//! - **Pure State Machine**: Uses quiz-core for side-effect-free view logic
//! - **Stale Response Protection**: Results from a superseded game never render
//!
//! ## Example
//!
//! ```ignore
//! use zimble_quiz_client::{ClientConfig, GameController, HttpTransport};
//!
//! let config = ClientConfig::default();
//! let transport = HttpTransport::new(&config)?;
//! let controller = GameController::new(transport, my_surface, &config);
//!
//! controller.start_game().await;
//! controller.submit_answer("Paris").await;
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod api;
pub mod config;
pub mod controller;
pub mod surface;
pub mod transport;

pub use api::{ApiError, GameApi, Payload};
pub use config::{ClientConfig, ConfigError};
pub use controller::GameController;
pub use surface::{RecordingSurface, Surface, SurfaceEvent};
pub use transport::{
    ApiRequest, ApiResponse, HttpTransport, Method, MockTransport, Transport, TransportError,
};
