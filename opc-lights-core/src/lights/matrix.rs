/// Maps between (x, y) on the grid and the index of the LED on the wire.
pub trait Layout {
    fn n_to_xy(n: usize, width: usize) -> (usize, usize);

    fn xy_to_n(x: usize, y: usize, width: usize) -> usize;
}

/// row-major. every row goes left to right
pub struct SimpleXY;

/// serpentine. odd rows run right to left
pub struct SnakeXY;

impl Layout for SimpleXY {
    fn n_to_xy(n: usize, width: usize) -> (usize, usize) {
        (n % width, n / width)
    }

    fn xy_to_n(x: usize, y: usize, width: usize) -> usize {
        y * width + x
    }
}

impl Layout for SnakeXY {
    fn n_to_xy(n: usize, width: usize) -> (usize, usize) {
        let y = n / width;
        let x = match y % 2 {
            0 => n % width,               // Even rows: left to right
            _ => width - 1 - (n % width), // Odd rows: right to left
        };
        (x, y)
    }

    fn xy_to_n(x: usize, y: usize, width: usize) -> usize {
        match y % 2 {
            0 => y * width + x,               // Even rows: left to right
            _ => y * width + (width - 1 - x), // Odd rows: right to left
        }
    }
}

/// How the strips are wired. Picked at runtime from the command line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Wiring {
    #[default]
    RowMajor,
    Zigzag,
}

impl Wiring {
    pub fn n_to_xy(self, n: usize, width: usize) -> (usize, usize) {
        match self {
            Self::RowMajor => SimpleXY::n_to_xy(n, width),
            Self::Zigzag => SnakeXY::n_to_xy(n, width),
        }
    }
}
