//! Log capture shared by integration tests.

// std
use std::sync::{Arc, Mutex};
// crates.io
use tracing::{
	Event, Level, Subscriber,
	field::{Field, Visit},
};
use tracing_subscriber::{Layer, layer::Context};

#[derive(Clone, Debug)]
pub struct CapturedEvent {
	pub level: Level,
	pub fields: Vec<(String, String)>,
}
impl CapturedEvent {
	pub fn field(&self, name: &str) -> Option<&str> {
		self.fields.iter().find(|(key, _)| key == name).map(|(_, value)| value.as_str())
	}
}

#[derive(Clone, Default)]
pub struct EventCollector {
	pub events: Arc<Mutex<Vec<CapturedEvent>>>,
}
impl EventCollector {
	pub fn snapshot(&self) -> Vec<CapturedEvent> {
		self.events.lock().expect("Event collector lock should not be poisoned.").clone()
	}
}
impl<S> Layer<S> for EventCollector
where
	S: Subscriber,
{
	fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
		let mut visitor = FieldVisitor::default();

		event.record(&mut visitor);
		self.events
			.lock()
			.expect("Event collector lock should not be poisoned.")
			.push(CapturedEvent { level: *event.metadata().level(), fields: visitor.0 });
	}
}

#[derive(Default)]
struct FieldVisitor(Vec<(String, String)>);
impl Visit for FieldVisitor {
	fn record_str(&mut self, field: &Field, value: &str) {
		self.0.push((field.name().to_owned(), value.to_owned()));
	}

	fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
		self.0.push((field.name().to_owned(), format!("{value:?}")));
	}
}
