pub mod geometry;
pub mod highlights;
pub mod model;
pub mod samples;
pub mod scale;
pub mod selection;
pub mod sound_view;
pub mod transition;
pub mod waveform;
pub mod widget;

pub use geometry::{Margin, PlotFrame, Size};
pub use highlights::MarkOverlay;
pub use model::{HostModel, InMemoryModel, ModelChange};
pub use samples::{SampleBuffer, SampleDataError};
pub use scale::{LinearScale, ScaledAxes};
pub use selection::{SelectionCallback, SelectionOverlay};
pub use sound_view::SoundView;
pub use transition::{Transition, Tween};
pub use waveform::WaveformPath;
pub use widget::SoundViewWidget;
