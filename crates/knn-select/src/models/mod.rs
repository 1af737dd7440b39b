pub mod nearest_neighbor;
