#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub struct RowsCount(pub usize);
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub struct ColumnsCount(pub usize);

#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub struct NodesCount(pub usize);
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub struct EdgesCount(pub usize);

/// Window width in pixels.
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub struct Width(pub usize);
/// Window height in pixels.
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub struct Height(pub usize);
/// Side length of one square cell in pixels.
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub struct CellSize(pub usize);
