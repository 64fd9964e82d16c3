// Chunk dimensions are powers of two so world -> chunk is a shift and
// world -> local is a mask.
pub const CHUNK_SIZE_X: usize = 32;
pub const CHUNK_SIZE_Y: usize = 64;
pub const CHUNK_SIZE_Z: usize = 32;
pub const CHUNK_VOLUME: usize = CHUNK_SIZE_X * CHUNK_SIZE_Y * CHUNK_SIZE_Z;

pub const CHUNK_POWER_X: u32 = CHUNK_SIZE_X.trailing_zeros();
pub const CHUNK_POWER_Y: u32 = CHUNK_SIZE_Y.trailing_zeros();
pub const CHUNK_POWER_Z: u32 = CHUNK_SIZE_Z.trailing_zeros();

pub const CHUNK_MASK_X: i32 = CHUNK_SIZE_X as i32 - 1;
pub const CHUNK_MASK_Y: i32 = CHUNK_SIZE_Y as i32 - 1;
pub const CHUNK_MASK_Z: i32 = CHUNK_SIZE_Z as i32 - 1;

const _: () = assert!(
    CHUNK_SIZE_X.is_power_of_two() && CHUNK_SIZE_Y.is_power_of_two() && CHUNK_SIZE_Z.is_power_of_two()
);

/// Chunk coordinate along one axis. `>>` on `i32` is arithmetic, so this floors
/// toward negative infinity (-1 lands in chunk -1, not 0).
#[inline]
pub const fn chunk_pos(coord: i32, power: u32) -> i32 {
    coord >> power
}

/// Chunk-relative coordinate along one axis; always in `0..=mask`.
#[inline]
pub const fn relative_pos(coord: i32, mask: i32) -> i32 {
    coord & mask
}

/// Inverse of the pair above.
#[inline]
pub const fn world_pos(chunk: i32, relative: i32, power: u32) -> i32 {
    (chunk << power) + relative
}

#[inline]
pub const fn chunk_pos_x(x: i32) -> i32 {
    chunk_pos(x, CHUNK_POWER_X)
}

#[inline]
pub const fn chunk_pos_y(y: i32) -> i32 {
    chunk_pos(y, CHUNK_POWER_Y)
}

#[inline]
pub const fn chunk_pos_z(z: i32) -> i32 {
    chunk_pos(z, CHUNK_POWER_Z)
}

#[inline]
pub const fn relative_x(x: i32) -> usize {
    relative_pos(x, CHUNK_MASK_X) as usize
}

#[inline]
pub const fn relative_y(y: i32) -> usize {
    relative_pos(y, CHUNK_MASK_Y) as usize
}

#[inline]
pub const fn relative_z(z: i32) -> usize {
    relative_pos(z, CHUNK_MASK_Z) as usize
}
