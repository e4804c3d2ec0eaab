//! Open/closed state of the app shell's side regions.

/// State of one collapsible region.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Region {
	#[default]
	Closed,
	Open,
}

impl Region {
	#[must_use]
	pub const fn toggle(self) -> Self {
		match self {
			Self::Closed => Self::Open,
			Self::Open => Self::Closed,
		}
	}

	#[must_use]
	pub const fn open(self) -> Self {
		Self::Open
	}

	#[must_use]
	pub const fn close(self) -> Self {
		Self::Closed
	}

	pub const fn is_open(self) -> bool {
		matches!(self, Self::Open)
	}
}

/// Regions owned by the app shell.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Regions {
	pub side_menu: Region,
	pub help_drawer: Region,
}

impl Regions {
	#[must_use]
	pub const fn toggle_side_menu(self) -> Self {
		Self {
			side_menu: self.side_menu.toggle(),
			..self
		}
	}

	#[must_use]
	pub const fn toggle_help_drawer(self) -> Self {
		Self {
			help_drawer: self.help_drawer.toggle(),
			..self
		}
	}

	/// Following a menu entry closes the side menu.
	#[must_use]
	pub const fn navigated(self) -> Self {
		Self {
			side_menu: self.side_menu.close(),
			..self
		}
	}

	/// The help drawer is only shown to a signed-in party.
	pub const fn help_drawer_visible(self, signed_in: bool) -> bool {
		signed_in && self.help_drawer.is_open()
	}
}
