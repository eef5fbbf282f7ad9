/// What a cell holds, fixed once the layout is built.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum CellContent {
    Mine,
    /// Safe cell with its adjacent mine count.
    Empty(u8),
}

/// Player-visible state of a single cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum CellView {
    Hidden,
    Mine,
    Revealed(u8),
}

impl CellView {
    /// Character drawn inside the cell border.
    pub const fn symbol(self) -> char {
        match self {
            Self::Hidden | Self::Revealed(0) => ' ',
            Self::Mine => '*',
            Self::Revealed(count) => match char::from_digit(count as u32, 10) {
                Some(digit) => digit,
                None => '?',
            },
        }
    }
}
