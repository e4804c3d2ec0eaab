//! Routing collaborator.

use custody_params::{Location, Route};
use tracing::debug;

/// Current location plus forward and back navigation.
pub trait Navigator {
	fn location(&self) -> &Location;

	/// Pushes `target` (path plus query).
	fn navigate(&mut self, target: &str);

	/// Returns to the previous location. False when already at the start.
	fn back(&mut self) -> bool;

	fn route(&self) -> Option<Route> {
		self.location().route()
	}
}

/// Menu entries in display order.
pub fn menu() -> impl Iterator<Item = (&'static str, Route)> {
	Route::ALL
		.into_iter()
		.filter_map(|route| route.title().map(|title| (title, route)))
}

/// In-memory history stack.
#[derive(Debug, Clone)]
pub struct History {
	current: Location,
	previous: Vec<Location>,
}

impl History {
	pub fn new(start: &str) -> Self {
		Self {
			current: Location::parse(start),
			previous: Vec::new(),
		}
	}

	/// Number of entries including the current one.
	#[allow(clippy::len_without_is_empty, reason = "history always holds the current location")]
	pub fn len(&self) -> usize {
		self.previous.len() + 1
	}
}

impl Default for History {
	fn default() -> Self {
		Self::new(Route::MyAccounts.path())
	}
}

impl Navigator for History {
	fn location(&self) -> &Location {
		&self.current
	}

	fn navigate(&mut self, target: &str) {
		let location = Location::parse(target);
		debug!(path = %location.path, "navigate");
		self.previous.push(std::mem::replace(&mut self.current, location));
	}

	fn back(&mut self) -> bool {
		let Some(location) = self.previous.pop() else {
			return false;
		};
		debug!(path = %location.path, "navigate back");
		self.current = location;
		true
	}
}
