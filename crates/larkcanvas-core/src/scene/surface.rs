//! The stage surface: canvas dimensions plus its layer stack.

use super::layer::Layer;
use kurbo::Size;

/// Handle to the host container element, used to keep the canvas sized to
/// its parent. The host's resize observer calls back into the stage when the
/// container changes.
pub trait ContainerHandle {
    fn client_size(&self) -> Size;
}

/// The drawing surface: width, height, and an ordered layer stack.
///
/// By convention the topmost layer hosts the transformer overlay and the
/// layer directly below it is the editable layer.
#[derive(Debug, Clone, Default)]
pub struct StageSurface {
    width: f64,
    height: f64,
    layers: Vec<Layer>,
}

impl StageSurface {
    /// Create a surface with the given dimensions and no layers.
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            layers: Vec::new(),
        }
    }

    /// Append a layer on top of the stack.
    pub fn add_layer(&mut self, layer: Layer) {
        self.layers.push(layer);
    }

    /// All layers, bottom to top.
    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    /// The editable layer: second from the top, below the overlay.
    pub fn editable_layer(&self) -> Option<&Layer> {
        if self.layers.len() >= 2 {
            self.layers.get(self.layers.len() - 2)
        } else {
            None
        }
    }

    /// Mutable access to the editable layer.
    pub fn editable_layer_mut(&mut self) -> Option<&mut Layer> {
        if self.layers.len() >= 2 {
            let index = self.layers.len() - 2;
            self.layers.get_mut(index)
        } else {
            None
        }
    }

    /// Set the surface dimensions.
    pub fn set_size(&mut self, size: Size) {
        self.width = size.width;
        self.height = size.height;
    }

    /// Current surface dimensions.
    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }
}
