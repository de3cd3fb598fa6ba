use super::*;

/// Uniform placement without replacement: draw a cell, retry if it already holds a mine.
#[derive(Clone, Debug, PartialEq)]
pub struct RandomMinefieldGenerator {
    seed: u64,
}

impl RandomMinefieldGenerator {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    /// Fresh seed from the thread-local RNG.
    pub fn from_entropy() -> Self {
        Self::new(rand::random())
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl MinefieldGenerator for RandomMinefieldGenerator {
    fn generate(self, config: GameConfig) -> MineLayout {
        use rand::prelude::*;

        let total_cells = config.total_cells();
        let mines = config.mines.min(total_cells);
        if mines < config.mines {
            log::warn!(
                "Minefield already full, requested {} but only fits {}",
                config.mines,
                total_cells
            );
        }

        let mut rng = SmallRng::seed_from_u64(self.seed);
        let mut mine_mask: Array2<bool> = Array2::default(config.size.to_nd_index());
        let mut mine_coords = Vec::with_capacity(mines.into());

        while (mine_coords.len() as CellCount) < mines {
            let index: CellCount = rng.random_range(0..total_cells);
            let coords = coords_from_index(index, config.size);
            let cell = &mut mine_mask[coords.to_nd_index()];
            if *cell {
                continue;
            }
            *cell = true;
            mine_coords.push(coords);
        }

        for &(row, col) in &mine_coords {
            log::debug!("Mine at: ({row},{col})");
        }

        MineLayout {
            mine_mask,
            mine_coords,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn places_exact_count_of_distinct_mines() {
        for seed in 0..64 {
            let layout = RandomMinefieldGenerator::new(seed).generate(GameConfig::default());
            let mut indices = layout.mine_indices();

            assert_eq!(indices.len(), 5);
            assert!(indices.iter().all(|&index| index < 100));
            indices.sort_unstable();
            indices.dedup();
            assert_eq!(indices.len(), 5, "seed {seed} produced duplicates");
        }
    }

    #[test]
    fn same_seed_same_layout() {
        let config = GameConfig::default();
        let a = RandomMinefieldGenerator::new(42).generate(config);
        let b = RandomMinefieldGenerator::new(42).generate(config);

        assert_eq!(a, b);
    }

    #[test]
    fn fills_board_when_every_cell_is_a_mine() {
        let config = GameConfig::new((3, 3), 9).unwrap();
        let layout = RandomMinefieldGenerator::new(7).generate(config);

        assert_eq!(layout.mine_count(), 9);
        assert_eq!(layout.safe_cell_count(), 0);
    }
}
