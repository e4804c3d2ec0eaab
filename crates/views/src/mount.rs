use tokio_util::sync::CancellationToken;

/// Read generations and mount lifetime of one page instance.
///
/// Each refresh takes a new generation and cancels the previous one; only the
/// latest generation of a still-mounted page may be applied.
#[derive(Debug, Default)]
pub(crate) struct Mount {
	latest: u64,
	mounted: CancellationToken,
	inflight: Option<CancellationToken>,
}

impl Mount {
	/// Starts a new generation, abandoning any read still in flight.
	pub fn next(&mut self) -> GenerationToken {
		if let Some(previous) = self.inflight.take() {
			previous.cancel();
		}
		self.latest = self.latest.wrapping_add(1);
		let cancel = self.mounted.child_token();
		self.inflight = Some(cancel.clone());
		GenerationToken {
			generation: self.latest,
			cancel,
		}
	}

	pub fn is_current(&self, generation: u64) -> bool {
		self.is_mounted() && generation == self.latest
	}

	pub fn is_mounted(&self) -> bool {
		!self.mounted.is_cancelled()
	}

	/// Cancels every outstanding generation.
	pub fn unmount(&mut self) {
		self.mounted.cancel();
		self.inflight = None;
	}
}

/// Generation-scoped cancellation token carried by a read.
#[derive(Debug, Clone)]
pub(crate) struct GenerationToken {
	generation: u64,
	cancel: CancellationToken,
}

impl GenerationToken {
	pub const fn generation(&self) -> u64 {
		self.generation
	}

	/// Resolves when the read is superseded or the page unmounts.
	pub async fn cancelled(&self) {
		self.cancel.cancelled().await;
	}
}
