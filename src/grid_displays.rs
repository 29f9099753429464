use fnv::FnvHashSet;

pub trait GridDisplay {
    /// Render the contents of a grid cell as text.
    /// The String should be 3 glyphs long, padded if required.
    fn render_cell_body(&self, _index: usize) -> String {
        String::from("   ")
    }
}

/// Empty cell bodies, just the walls.
#[derive(Debug, Copy, Clone)]
pub struct BlankDisplay;
impl GridDisplay for BlankDisplay {}

/// Start, end and player markers.
#[derive(Debug, Copy, Clone)]
pub struct MarkersDisplay {
    start: usize,
    end: usize,
    player: Option<usize>,
}
impl MarkersDisplay {
    pub fn new(start: usize, end: usize, player: Option<usize>) -> MarkersDisplay {
        MarkersDisplay { start, end, player }
    }

    fn marker(&self, index: usize) -> Option<&'static str> {
        if Some(index) == self.player {
            Some(" @ ")
        } else if index == self.start {
            Some(" S ")
        } else if index == self.end {
            Some(" E ")
        } else {
            None
        }
    }
}
impl GridDisplay for MarkersDisplay {
    fn render_cell_body(&self, index: usize) -> String {
        String::from(self.marker(index).unwrap_or("   "))
    }
}

#[derive(Debug)]
pub struct PathDisplay {
    on_path_indices: FnvHashSet<usize>,
}
impl PathDisplay {
    pub fn new(path: &[usize]) -> Self {
        PathDisplay { on_path_indices: path.iter().cloned().collect() }
    }
}
impl GridDisplay for PathDisplay {
    fn render_cell_body(&self, index: usize) -> String {
        if self.on_path_indices.contains(&index) {
            String::from(" . ")
        } else {
            String::from("   ")
        }
    }
}

/// Markers drawn over an optional solution path.
#[derive(Debug)]
pub struct LayeredDisplay {
    markers: MarkersDisplay,
    path: Option<PathDisplay>,
}
impl LayeredDisplay {
    pub fn new(markers: MarkersDisplay, path: Option<PathDisplay>) -> LayeredDisplay {
        LayeredDisplay { markers, path }
    }
}
impl GridDisplay for LayeredDisplay {
    fn render_cell_body(&self, index: usize) -> String {
        if let Some(marker) = self.markers.marker(index) {
            String::from(marker)
        } else if let Some(ref path) = self.path {
            path.render_cell_body(index)
        } else {
            String::from("   ")
        }
    }
}
