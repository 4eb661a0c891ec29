pub mod posthog;

pub use posthog::PostHogTelemetry;
