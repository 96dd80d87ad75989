pub mod corner_grid;
