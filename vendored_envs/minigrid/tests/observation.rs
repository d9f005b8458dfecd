use minigrid_rs::engine::MiniGridEnv;
use minigrid_rs::types::{Action, Color, Direction, ObjectKind};
use minigrid_rs::{EnvConfig, FixedLayout, Grid, WorldObj};

const EMPTY: [u8; 3] = [ObjectKind::Empty as u8, 0, 0];

fn room(grid: Grid, pos: (i32, i32), dir: Direction, view: i32, see_through_walls: bool) -> MiniGridEnv {
    let cfg = EnvConfig {
        width: grid.width(),
        height: grid.height(),
        agent_view_size: view,
        see_through_walls,
        ..EnvConfig::default()
    };
    MiniGridEnv::new(cfg, Box::new(FixedLayout::new(grid, pos, dir, "look around"))).unwrap()
}

#[test]
fn agent_cell_is_bottom_centre_when_facing_north() {
    let env = room(Grid::walled(7, 7), (3, 3), Direction::Up, 3, true);
    let obs = env.render();
    assert_eq!(obs.view_size, 3);
    assert_eq!(obs.image.len(), 27);
    // Tensor is indexed [x][y]; row 2, col 1 of the view is x=1, y=2.
    assert_eq!(obs.cell(1, 2), EMPTY);
    assert_eq!(obs.visibility.count_visible(), 9);
}

#[test]
fn forward_cell_renders_above_agent_in_every_direction() {
    for dir in Direction::ALL {
        let mut grid = Grid::walled(7, 7);
        let (dx, dy) = dir.delta();
        grid.set(3 + dx, 3 + dy, WorldObj::goal());
        let env = room(grid, (3, 3), dir, 3, false);
        let obs = env.render();
        assert_eq!(obs.cell(1, 1), WorldObj::goal().encode(), "{dir:?}");
        assert_eq!(obs.cell(1, 2), EMPTY, "{dir:?}");
    }
}

#[test]
fn left_of_view_stays_left_after_transpose() {
    // Facing up, the cell up-and-left of the agent is view row 1, col 0.
    let mut grid = Grid::walled(7, 7);
    grid.set(2, 2, WorldObj::ball(Color::Blue));
    let env = room(grid, (3, 3), Direction::Up, 3, true);
    let obs = env.render();
    assert_eq!(obs.cell(0, 1), WorldObj::ball(Color::Blue).encode());
    assert_eq!(obs.cell(1, 0), EMPTY);
    assert_eq!(obs.to_nested()[0][1], WorldObj::ball(Color::Blue).encode());
}

#[test]
fn wall_hides_what_is_behind_it() {
    let mut grid = Grid::walled(7, 7);
    grid.horz_wall(1, 3, 5);
    grid.set(3, 1, WorldObj::goal());
    let hidden = room(grid.clone(), (3, 4), Direction::Up, 5, false).render();
    // Visible: the agent row and the wall row.
    assert_eq!(hidden.visibility.count_visible(), 10);
    assert_eq!(hidden.cell(2, 1), [0, 0, 0], "occluded cells are left untouched");
    assert_eq!(hidden.cell(2, 3), WorldObj::wall().encode());

    let open = room(grid, (3, 4), Direction::Up, 5, true).render();
    assert_eq!(open.visibility.count_visible(), 25);
    assert_eq!(open.cell(2, 1), WorldObj::goal().encode());
}

#[test]
fn open_door_lets_light_through() {
    let mut grid = Grid::walled(7, 7);
    grid.horz_wall(1, 3, 5);
    grid.set(3, 3, WorldObj::door(Color::Yellow, false, false));
    grid.set(3, 2, WorldObj::key(Color::Red));
    let mut env = room(grid, (3, 4), Direction::Up, 5, false);
    assert_eq!(env.render().cell(2, 2), [0, 0, 0]);
    assert_eq!(env.render().cell(2, 3), [ObjectKind::Door as u8, Color::Yellow as u8, 1]);

    env.step(Action::Toggle);
    let obs = env.render();
    assert_eq!(obs.cell(2, 3), [ObjectKind::Door as u8, Color::Yellow as u8, 0]);
    assert_eq!(obs.cell(2, 2), WorldObj::key(Color::Red).encode());
}

#[test]
fn carried_object_is_drawn_in_agent_cell() {
    let mut env = MiniGridEnv::from_task("doorkey_inline").unwrap();
    env.step(Action::Pickup);
    let obs = env.render();
    let n = obs.view_size;
    assert_eq!(obs.cell(n / 2, n - 1), WorldObj::key(Color::Yellow).encode());
}

#[test]
fn cells_outside_grid_render_as_walls() {
    let env = room(Grid::walled(5, 5), (1, 1), Direction::Up, 3, true);
    let obs = env.render();
    for x in 0..3 {
        assert_eq!(obs.cell(x, 0), WorldObj::wall().encode());
    }
}

#[test]
fn render_into_only_writes_visible_cells() {
    let mut grid = Grid::walled(7, 7);
    grid.horz_wall(1, 3, 5);
    let env = room(grid, (3, 4), Direction::Up, 5, false);
    let mut buf = vec![0xAAu8; 5 * 5 * 3];
    let mask = env.render_into(&mut buf);
    for y in 0..5 {
        for x in 0..5 {
            let base = (x * 5 + y) * 3;
            if mask.get(y, x) {
                assert_ne!(buf[base], 0xAA);
            } else {
                assert_eq!(&buf[base..base + 3], &[0xAA; 3]);
            }
        }
    }
}

#[test]
#[should_panic(expected = "observation buffer")]
fn wrongly_sized_buffer_is_fatal() {
    let env = MiniGridEnv::from_task("empty_5x5").unwrap();
    let mut buf = vec![0u8; 10];
    env.render_into(&mut buf);
}
