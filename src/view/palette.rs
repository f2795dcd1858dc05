/// Chart colours, reused cyclically by category position.
pub const PALETTE: [&str; 10] = [
    "#3b82f6", // blue
    "#10b981", // green
    "#f59e0b", // amber
    "#8b5cf6", // purple
    "#ec4899", // pink
    "#ef4444", // red
    "#6366f1", // indigo
    "#0ea5e9", // sky
    "#14b8a6", // teal
    "#f97316", // orange
];

pub fn color_for(position: usize) -> &'static str {
    PALETTE[position % PALETTE.len()]
}
