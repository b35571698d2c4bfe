use serde::Serialize;

/// Reliability of one block's orientation estimate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockState {
    /// Enough gradient energy and coherence on its own.
    Confident,
    /// Low confidence, replaced by the average of confident neighbours.
    Filled,
    /// Low confidence without enough confident support; ignored downstream.
    Invalid,
}

impl BlockState {
    #[inline]
    pub fn is_usable(self) -> bool {
        !matches!(self, BlockState::Invalid)
    }
}

/// Block-wise ridge orientation grid.
///
/// Angles are ridge-flow directions in `[0, π)` measured with `atan2` in
/// image coordinates (x right, y down). Block `(bx, by)` covers pixels
/// `[bx·B, (bx+1)·B) × [by·B, (by+1)·B)`, clipped at the image border.
#[derive(Clone, Debug, Serialize)]
pub struct OrientationField {
    pub blocks_x: usize,
    pub blocks_y: usize,
    pub block_size: usize,
    pub image_width: usize,
    pub image_height: usize,
    pub angles: Vec<f32>,
    pub coherence: Vec<f32>,
    pub state: Vec<BlockState>,
}

impl OrientationField {
    /// Field with every block confident, for callers that synthesize angles.
    pub fn from_angles(
        blocks_x: usize,
        blocks_y: usize,
        block_size: usize,
        angles: Vec<f32>,
    ) -> Self {
        assert_eq!(angles.len(), blocks_x * blocks_y, "angle grid size mismatch");
        let n = angles.len();
        Self {
            blocks_x,
            blocks_y,
            block_size,
            image_width: blocks_x * block_size,
            image_height: blocks_y * block_size,
            angles: angles
                .into_iter()
                .map(crate::angle::normalize_half_pi)
                .collect(),
            coherence: vec![1.0; n],
            state: vec![BlockState::Confident; n],
        }
    }

    #[inline]
    pub fn index(&self, bx: usize, by: usize) -> usize {
        by * self.blocks_x + bx
    }

    #[inline]
    pub fn angle(&self, bx: usize, by: usize) -> f32 {
        self.angles[self.index(bx, by)]
    }

    #[inline]
    pub fn block_state(&self, bx: usize, by: usize) -> BlockState {
        self.state[self.index(bx, by)]
    }

    /// Centre of block `(bx, by)` in pixel coordinates, honouring clipped
    /// border blocks.
    pub fn block_center(&self, bx: usize, by: usize) -> [f32; 2] {
        let b = self.block_size;
        let x0 = bx * b;
        let y0 = by * b;
        let x1 = ((bx + 1) * b).min(self.image_width.max(x0 + 1));
        let y1 = ((by + 1) * b).min(self.image_height.max(y0 + 1));
        [0.5 * (x0 + x1) as f32, 0.5 * (y0 + y1) as f32]
    }

    pub fn count_state(&self, state: BlockState) -> usize {
        self.state.iter().filter(|&&s| s == state).count()
    }

    pub fn has_confident_blocks(&self) -> bool {
        self.state.contains(&BlockState::Confident)
    }
}
