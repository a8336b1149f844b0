use std::io::Write;

use boid_core::{FrameSink, Placement, Vector2D};
use boid_shared::FrameSnapshot;

/// Writes one JSON `FrameSnapshot` per line
pub struct JsonLinesSink<W: Write> {
    writer: W,
    frame: u64,
    dt: f64,
    failed: Option<std::io::Error>,
}

impl<W: Write> JsonLinesSink<W> {
    pub fn new(writer: W, dt: f32) -> Self {
        Self {
            writer,
            frame: 0,
            dt: f64::from(dt),
            failed: None,
        }
    }

    /// Flush and return the writer, or the first write error hit.
    pub fn finish(mut self) -> std::io::Result<W> {
        if let Some(err) = self.failed.take() {
            return Err(err);
        }
        self.writer.flush()?;
        Ok(self.writer)
    }

    fn write_frame(&mut self, placements: &[Placement]) -> std::io::Result<()> {
        let snapshot = FrameSnapshot::new(self.frame, self.frame as f64 * self.dt, placements);
        serde_json::to_writer(&mut self.writer, &snapshot)?;
        self.writer.write_all(b"\n")
    }
}

impl<W: Write> FrameSink for JsonLinesSink<W> {
    fn present(&mut self, placements: &[Placement]) {
        self.frame += 1;
        if self.failed.is_some() {
            return;
        }
        if let Err(err) = self.write_frame(placements) {
            log::warn!("Failed to write frame {}: {}", self.frame, err);
            self.failed = Some(err);
        }
    }
}

/// Logs flock centroid and the mean distance moved per frame every `every` frames
pub struct SummarySink {
    every: u64,
    frame: u64,
    last_positions: Vec<Vector2D>,
    last_summary: Option<Summary>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Summary {
    pub frame: u64,
    pub centroid: Vector2D,
    /// Mean displacement per frame since the previous frame.
    pub mean_step: f32,
}

impl SummarySink {
    pub fn new(every: u64) -> Self {
        Self {
            every: every.max(1),
            frame: 0,
            last_positions: Vec::new(),
            last_summary: None,
        }
    }

    pub fn last_summary(&self) -> Option<Summary> {
        self.last_summary
    }
}

impl FrameSink for SummarySink {
    fn present(&mut self, placements: &[Placement]) {
        self.frame += 1;
        let positions: Vec<Vector2D> = placements.iter().map(Placement::position).collect();

        if self.frame % self.every == 0 && !positions.is_empty() {
            let count = positions.len() as f32;
            let centroid = positions
                .iter()
                .fold(Vector2D::zero(), |sum, &p| sum + p)
                / count;
            let mean_step = if self.last_positions.len() == positions.len() {
                positions
                    .iter()
                    .zip(self.last_positions.iter())
                    .map(|(p, last)| p.distance(last))
                    .sum::<f32>()
                    / count
            } else {
                0.0
            };

            let summary = Summary {
                frame: self.frame,
                centroid,
                mean_step,
            };
            log::info!(
                "frame {}: centroid ({:.3}, {:.3}), mean step {:.4}",
                summary.frame,
                centroid.x,
                centroid.y,
                mean_step
            );
            self.last_summary = Some(summary);
        }

        self.last_positions = positions;
    }
}

/// Fans one frame out to several sinks
pub struct Tee<'a> {
    sinks: Vec<&'a mut dyn FrameSink>,
}

impl<'a> Tee<'a> {
    pub fn new(sinks: Vec<&'a mut dyn FrameSink>) -> Self {
        Self { sinks }
    }
}

impl FrameSink for Tee<'_> {
    fn present(&mut self, placements: &[Placement]) {
        for sink in self.sinks.iter_mut() {
            sink.present(placements);
        }
    }

    fn debug_line(&mut self, line: boid_core::DebugLine) {
        for sink in self.sinks.iter_mut() {
            sink.debug_line(line);
        }
    }
}
