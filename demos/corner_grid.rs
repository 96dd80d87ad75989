
use bilerp::{errors::BilerpError, grids::corner_grid::CornerGrid, serialization::{deserialize, serialize, SerializationFormat}};

fn height_field()
{
    println!("\nRunning \"height_field\" example\n");
    // Pin a height to each corner of a terrain cell and sample across it.
    let mut cell = CornerGrid::from_fn(|_, coordinate| coordinate[0] + 2.0 * coordinate[1]);
    println!("corners: {}", cell);
    for &fraction in &[[0.0, 0.0], [0.25, 0.5], [0.5, 0.5], [1.0, 1.0]]
    {
        println!("height at {:?} = {}", fraction, cell.interpolate(fraction));
    }
    // Smoothing only matters away from corners and the exact midpoint.
    cell.smoothing_enabled = false;
    println!("height at [0.25, 0.5] without smoothing = {}", cell.interpolate_xy(0.25, 0.5));
}

fn color_gradient()
{
    println!("\nRunning \"color_gradient\" example\n");
    // Corner colors blend component-wise: red, green, blue, white.
    let gradient = CornerGrid::from_fn(|index, _| match index
    {
        0 => [1.0, 0.0, 0.0],
        1 => [0.0, 1.0, 0.0],
        2 => [0.0, 0.0, 1.0],
        _ => [1.0, 1.0, 1.0],
    });
    println!("center color = {:?}", gradient.interpolate_xy(0.5, 0.5));

    // Batch sampling runs in parallel; here a 4x4 swatch.
    let mut fractions = Vec::new();
    for i in 0..4
    {
        for j in 0..4
        {
            fractions.push([i as f64 / 3.0, j as f64 / 3.0]);
        }
    }
    let swatch = gradient.interpolate_batch(&fractions);
    for (fraction, color) in fractions.iter().zip(&swatch)
    {
        println!("{:?} -> {:?}", fraction, color);
    }
}

fn persistence() -> Result<(), BilerpError>
{
    println!("\nRunning \"persistence\" example\n");
    let grid = CornerGrid::from_fn(|index, _| index as f64 * 0.25);

    let buffer = grid.write_buffer()?;
    let restored = CornerGrid::<f64>::read_buffer(&buffer)?;
    println!("lz4+bincode buffer: {} bytes, corners {}", buffer.len(), restored);

    // Format-selectable helpers cover the readable path too.
    let json = serialize(&grid, SerializationFormat::Json)?;
    println!("json: {}", String::from_utf8_lossy(&json));
    let restored: CornerGrid<f64> = deserialize(&json, SerializationFormat::Json)?;
    println!("restored corners {}", restored);
    Ok(())
}

fn main()
{
    height_field();
    color_gradient();
    persistence().unwrap();
}
