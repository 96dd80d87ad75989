use std::io::Write;

use rayon::iter::{IntoParallelRefIterator, ParallelIterator};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::errors::BilerpError;
use crate::interpolation::{smoothstep, Interpolatable};

/// Unit-square coordinate of the corner at each index.
pub const CORNER_COORDINATES: [[f64; 2]; 4] = [
    [0.0, 0.0],
    [1.0, 0.0],
    [0.0, 1.0],
    [1.0, 1.0],
];

///
/// Four values pinned to the corners of the unit square, blended with
/// bilinear interpolation. Corner order is fixed: bottom-left, bottom-right,
/// top-left, top-right.
///
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CornerGrid<T>
{
    values: [T; 4],
    /// Pre-warp interpolation coordinates through `smoothstep` before
    /// blending. Avoids visible creases where adjacent grids tile.
    pub smoothing_enabled: bool,
}

impl<T> CornerGrid<T>
{
    /// Populate all four corners with copies of the supplied value.
    pub fn uniform(value: T) -> Self
    where
        T: Clone,
    {
        Self
        {
            values: [value.clone(), value.clone(), value.clone(), value],
            smoothing_enabled: true,
        }
    }

    ///
    /// Populate the corners from a generator, called exactly once per corner
    /// in index order (0 through 3) with that corner's unit-square coordinate.
    ///
    pub fn from_fn<F: FnMut(usize, [f64; 2]) -> T>(mut generator: F) -> Self
    {
        // Array literals evaluate left to right, so the generator sees the
        // corners in index order.
        let values = [
            generator(0, CORNER_COORDINATES[0]),
            generator(1, CORNER_COORDINATES[1]),
            generator(2, CORNER_COORDINATES[2]),
            generator(3, CORNER_COORDINATES[3]),
        ];
        Self { values, smoothing_enabled: true }
    }

    /// Index 0.
    pub fn bottom_left(&self) -> &T
    {
        &self.values[0]
    }

    /// Index 1.
    pub fn bottom_right(&self) -> &T
    {
        &self.values[1]
    }

    /// Index 2.
    pub fn top_left(&self) -> &T
    {
        &self.values[2]
    }

    /// Index 3.
    pub fn top_right(&self) -> &T
    {
        &self.values[3]
    }

    pub fn set_bottom_left(&mut self, value: T)
    {
        self.values[0] = value;
    }

    pub fn set_bottom_right(&mut self, value: T)
    {
        self.values[1] = value;
    }

    pub fn set_top_left(&mut self, value: T)
    {
        self.values[2] = value;
    }

    pub fn set_top_right(&mut self, value: T)
    {
        self.values[3] = value;
    }

    /// Get the corner value at `index`, or `None` outside 0..=3.
    pub fn get(&self, index: usize) -> Option<&T>
    {
        self.values.get(index)
    }

    /// Replace the corner value at `index`. Out-of-range indices are ignored.
    pub fn set(&mut self, index: usize, value: T)
    {
        if let Some(slot) = self.values.get_mut(index)
        {
            *slot = value;
        }
    }

    /// All four corner values, in index order.
    pub fn values(&self) -> &[T; 4]
    {
        &self.values
    }
}

impl<T: Interpolatable> CornerGrid<T>
{
    ///
    /// Blend the four corners at a fractional position, each component
    /// expected in [0.0, 1.0]. Positions outside the unit square extrapolate.
    ///
    /// Interpolates the bottom pair by x, the top pair by x, then the two
    /// results by y.
    ///
    #[inline]
    pub fn interpolate(&self, fraction: [f64; 2]) -> T
    {
        let [mut x, mut y] = fraction;
        if self.smoothing_enabled
        {
            x = smoothstep(x);
            y = smoothstep(y);
        }
        let bottom = self.values[0].lerp(&self.values[1], x);
        let top = self.values[2].lerp(&self.values[3], x);
        bottom.lerp(&top, y)
    }

    /// Identical to calling `interpolate([x, y])`.
    #[inline]
    pub fn interpolate_xy(&self, x: f64, y: f64) -> T
    {
        self.interpolate([x, y])
    }

    /// Blend at multiple fractional positions in parallel.
    pub fn interpolate_batch(&self, fractions: &[[f64; 2]]) -> Vec<T>
    where
        T: Send + Sync,
    {
        fractions.par_iter().map(|&fraction| self.interpolate(fraction)).collect()
    }
}

impl<T> CornerGrid<T>
{
    ///
    /// Saves the grid to a file, compressed using LZ4.
    ///
    pub fn save(&self, path: &str) -> Result<(), BilerpError>
    where
        T: Serialize,
    {
        let mut file = std::io::BufWriter::new(std::fs::File::create(path).map_err(|_|BilerpError::FileIOError)?);
        let buffer = self.write_buffer()?;
        file.write_all(&buffer).map_err(|_|BilerpError::WriteBufferFailed)?;
        Ok(())
    }

    /// Serialize the grid to an LZ4-compressed buffer.
    pub fn write_buffer(&self) -> Result<Vec<u8>, BilerpError>
    where
        T: Serialize,
    {
        Ok(lz4_flex::compress_prepend_size(&bincode::serialize(&self).map_err(|_|BilerpError::SerializationFailed)?))
    }

    /// Read a grid from an LZ4-compressed buffer produced by `write_buffer`.
    pub fn read_buffer(buffer: &[u8]) -> Result<Self, BilerpError>
    where
        T: DeserializeOwned,
    {
        let buffer = lz4_flex::decompress_size_prepended(buffer).map_err(|_|BilerpError::LZ4DecompressionFailed)?;
        bincode::deserialize(&buffer).map_err(|_|BilerpError::DeserializationFailed)
    }

    /// Read a grid from a reader holding LZ4-compressed grid data.
    pub fn read<Reader: std::io::Read>(mut reader: Reader) -> Result<Self, BilerpError>
    where
        T: DeserializeOwned,
    {
        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes).map_err(|_|BilerpError::ReadBufferFailed)?;
        Self::read_buffer(&bytes)
    }
}

impl<T: Default + Clone> Default for CornerGrid<T>
{
    fn default() -> Self
    {
        Self::uniform(T::default())
    }
}

impl<T: std::fmt::Debug> std::fmt::Display for CornerGrid<T>
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result
    {
        write!(f, "{:?}", self.values)
    }
}

#[test]
fn check_uniform_interpolation()
{
    let grid: CornerGrid<f64> = CornerGrid::uniform(2.5);
    for i in 0..=10
    {
        for j in 0..=10
        {
            let x = i as f64 / 10.0;
            let y = j as f64 / 10.0;
            assert!((grid.interpolate_xy(x, y) - 2.5).abs() < 1e-12);
        }
    }
}

#[test]
fn check_corner_exactness()
{
    let mut grid = CornerGrid::from_fn(|index, _| index as f64 * 10.0);
    for smoothing in [true, false]
    {
        grid.smoothing_enabled = smoothing;
        assert_eq!(grid.interpolate_xy(0.0, 0.0), *grid.bottom_left());
        assert_eq!(grid.interpolate_xy(1.0, 0.0), *grid.bottom_right());
        assert_eq!(grid.interpolate_xy(0.0, 1.0), *grid.top_left());
        assert_eq!(grid.interpolate_xy(1.0, 1.0), *grid.top_right());
    }
}

#[test]
fn check_smoothing_is_identity_at_midpoint()
{
    let mut grid = CornerGrid::from_fn(|index, _| (index * index) as f64);
    grid.smoothing_enabled = false;
    let unsmoothed = grid.interpolate_xy(0.5, 0.5);
    grid.smoothing_enabled = true;
    let smoothed = grid.interpolate_xy(0.5, 0.5);
    assert!((smoothed - unsmoothed).abs() < 1e-14);
}

#[test]
fn check_bottom_edge_is_monotonic()
{
    let mut grid = CornerGrid::from_fn(|_, coordinate| coordinate[0]);
    for smoothing in [true, false]
    {
        grid.smoothing_enabled = smoothing;
        let mut previous = grid.interpolate_xy(0.0, 0.0);
        for i in 1..=100
        {
            let x = i as f64 / 100.0;
            let value = grid.interpolate_xy(x, 0.0);
            assert!(value >= previous);
            previous = value;
        }
    }
    grid.smoothing_enabled = false;
    for i in 0..=100
    {
        let x = i as f64 / 100.0;
        assert!((grid.interpolate_xy(x, 0.0) - x).abs() < 1e-14);
    }
}

#[test]
fn check_out_of_range_access()
{
    let mut grid = CornerGrid::uniform(1.0);
    assert_eq!(grid.get(4), None);
    assert_eq!(grid.get(usize::MAX), None);
    grid.set(10, -3.0);
    assert_eq!(*grid.values(), [1.0; 4]);
}

#[test]
fn check_named_accessors_match_indices()
{
    let mut grid = CornerGrid::uniform(0.0);
    grid.set_bottom_left(1.0);
    grid.set_bottom_right(2.0);
    grid.set(2, 3.0);
    grid.set_top_right(4.0);
    assert_eq!(grid.bottom_left(), grid.get(0).unwrap());
    assert_eq!(grid.bottom_right(), grid.get(1).unwrap());
    assert_eq!(grid.top_left(), grid.get(2).unwrap());
    assert_eq!(grid.top_right(), grid.get(3).unwrap());
    assert_eq!(*grid.values(), [1.0, 2.0, 3.0, 4.0]);
}

#[test]
fn check_generated_corners()
{
    let mut grid = CornerGrid::from_fn(|_, coordinate| coordinate[0] + coordinate[1]);
    assert_eq!(*grid.values(), [0.0, 1.0, 1.0, 2.0]);
    grid.smoothing_enabled = false;
    assert!((grid.interpolate_xy(0.5, 0.5) - 1.0).abs() < 1e-14);
}

#[test]
fn check_generator_call_order()
{
    let mut seen = Vec::new();
    let _ = CornerGrid::from_fn(|index, coordinate|
    {
        seen.push((index, coordinate));
        0.0
    });
    assert_eq!(seen.len(), 4);
    for (i, (index, coordinate)) in seen.iter().enumerate()
    {
        assert_eq!(*index, i);
        assert_eq!(*coordinate, CORNER_COORDINATES[i]);
    }
}

#[test]
fn check_batch_matches_single()
{
    let grid = CornerGrid::from_fn(|_, coordinate| coordinate[0] * coordinate[0] + coordinate[1]);
    let fractions: Vec<[f64; 2]> = (0..1000).map(|i| [(i % 37) as f64 / 36.0, (i % 11) as f64 / 10.0]).collect();
    let batch = grid.interpolate_batch(&fractions);
    for (fraction, value) in fractions.iter().zip(&batch)
    {
        assert_eq!(grid.interpolate(*fraction), *value);
    }
}

#[test]
fn check_vector_valued_corners()
{
    // Blend a color gradient: red, green, blue, white.
    let grid: CornerGrid<[f64; 3]> = CornerGrid::from_fn(|index, _| match index
    {
        0 => [1.0, 0.0, 0.0],
        1 => [0.0, 1.0, 0.0],
        2 => [0.0, 0.0, 1.0],
        _ => [1.0, 1.0, 1.0],
    });
    let center = grid.interpolate_xy(0.5, 0.5);
    assert!((center[0] - 0.5).abs() < 1e-14);
    assert!((center[1] - 0.5).abs() < 1e-14);
    assert!((center[2] - 0.5).abs() < 1e-14);
    assert_eq!(grid.interpolate_xy(0.0, 0.0), [1.0, 0.0, 0.0]);
}

#[test]
fn check_buffer_roundtrip()
{
    let mut grid = CornerGrid::from_fn(|index, _| index as f64);
    grid.smoothing_enabled = false;
    let buffer = grid.write_buffer().unwrap();
    let restored = CornerGrid::<f64>::read_buffer(&buffer).unwrap();
    assert_eq!(restored.values(), grid.values());
    assert_eq!(restored.smoothing_enabled, grid.smoothing_enabled);
}

#[test]
fn check_read_rejects_garbage()
{
    let result = CornerGrid::<f64>::read_buffer(&[4, 0, 0, 0, 0xff]);
    assert_eq!(result.unwrap_err(), BilerpError::LZ4DecompressionFailed);
}

#[test]
fn check_save_and_read()
{
    let grid = CornerGrid::from_fn(|index, _| [index as f32, 1.0 - index as f32]);
    let path = std::env::temp_dir().join("bilerp_corner_grid_test.bin");
    let path = path.to_str().unwrap();
    grid.save(path).unwrap();
    let restored = CornerGrid::<[f32; 2]>::read(std::fs::File::open(path).unwrap()).unwrap();
    assert_eq!(restored.values(), grid.values());
    std::fs::remove_file(path).unwrap();
}

#[test]
fn check_display()
{
    let grid = CornerGrid::uniform(1.5);
    assert_eq!(format!("{}", grid), "[1.5, 1.5, 1.5, 1.5]");
}
