//! Movement-legality oracle for path validity assertions.

use warren_core::{Coord, FloorFlags, WallFlags, WorldGrid, DEADLY_FLUID_LEVEL};

fn enterable(world: &dyn WorldGrid, coord: Coord, ignore_no_pass: bool) -> bool {
    world.is_walkable(coord)
        && world.fluid_level(coord) < DEADLY_FLUID_LEVEL
        && (ignore_no_pass || !world.is_impassable(coord))
}

/// Whether `from -> to` is a single legal move under the engine's
/// movement rules.
///
/// Enumerates the same move set the search expands: cardinal steps,
/// corner-cut-guarded diagonals, ramp-assisted descent through a
/// ramp-top neighbor, stair/scaffold verticals, and ramp ascent to the
/// four cardinals one level up. Used by tests to assert that every
/// consecutive pair in a returned path is legal.
pub fn is_legal_move(world: &dyn WorldGrid, from: Coord, to: Coord, ignore_no_pass: bool) -> bool {
    if !enterable(world, to, ignore_no_pass) {
        return false;
    }

    let cardinals = from.cardinals();

    // Plain cardinal step.
    if cardinals.contains(&to) {
        return true;
    }

    // Diagonal step: both flanking orthogonal cells must be open.
    let diagonals = [
        from.north_east(),
        from.south_east(),
        from.south_west(),
        from.north_west(),
    ];
    let flanks = [(0, 1), (1, 2), (2, 3), (3, 0)];
    for (diagonal, &(a, b)) in diagonals.into_iter().zip(flanks.iter()) {
        if to == diagonal {
            return enterable(world, cardinals[a], ignore_no_pass)
                && enterable(world, cardinals[b], ignore_no_pass);
        }
    }

    // Ramp-assisted descent: a cardinal neighbor whose floor is a
    // ramp top drops the mover one level below that neighbor.
    for neighbor in cardinals {
        if to == neighbor.below()
            && world.floor_flags(neighbor).intersects(FloorFlags::RAMP_TOP)
        {
            return true;
        }
    }

    let wall = world.wall_flags(from);

    // Stair or scaffold up.
    if to == from.above() && wall.intersects(WallFlags::STAIR | WallFlags::SCAFFOLD) {
        return true;
    }

    // Stair-top or scaffold down.
    if to == from.below()
        && world
            .floor_flags(from)
            .intersects(FloorFlags::STAIR_TOP | FloorFlags::SCAFFOLD)
    {
        return true;
    }

    // Ramp ascent: the four cardinals one level above.
    if wall.intersects(WallFlags::RAMP) && from.above().cardinals().contains(&to) {
        return true;
    }

    false
}
