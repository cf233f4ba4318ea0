//! Common test infrastructure for `intent-bench`.
//!
//! - Verbose logging with auto-dump on test failure
//! - Test harness with a temp directory per test
//! - A scripted local HTTP server standing in for both oracles

pub mod harness;
pub mod logging;
pub mod server;

#[allow(unused_imports)]
pub use harness::TestHarness;
#[allow(unused_imports)]
pub use server::{Reply, ScriptedServer, refused_url};

/// Two-row sample file covering services 4 and 7.
#[allow(dead_code)]
pub const TWO_SAMPLES: &str = "service_id;service_name;intent\n\
4;Status de Entrega do Cartão;onde está meu cartão?\n\
7;Cancelamento de cartão;quero cancelar meu cartão\n";
