mod engine;
mod fake_services;

pub use engine::TestEngine;
pub use fake_services::FakeServices;
