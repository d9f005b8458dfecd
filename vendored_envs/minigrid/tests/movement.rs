use minigrid_rs::engine::MiniGridEnv;
use minigrid_rs::types::{Action, Color, Direction};
use minigrid_rs::{EnvConfig, FixedLayout, Grid, WorldObj};

fn facing(obj: WorldObj) -> MiniGridEnv {
    let mut grid = Grid::walled(5, 5);
    grid.set(2, 1, obj);
    let layout = FixedLayout::new(grid, (1, 1), Direction::Right, "face an object");
    MiniGridEnv::new(EnvConfig::default(), Box::new(layout)).unwrap()
}

#[test]
fn basic_turning_movement() {
    let mut env = MiniGridEnv::from_task("empty_5x5").unwrap();

    env.step(Action::Right);
    assert_eq!(env.agent_pos(), (1, 1));
    assert_eq!(env.agent_dir(), Direction::Down);

    env.step(Action::Right);
    assert_eq!(env.agent_dir(), Direction::Left);

    env.step(Action::Left);
    assert_eq!(env.agent_pos(), (1, 1));
    assert_eq!(env.agent_dir(), Direction::Down);

    // Turning from Right wraps to Up.
    env.step(Action::Left);
    env.step(Action::Left);
    assert_eq!(env.agent_dir(), Direction::Up);
}

#[test]
fn solid_objects_block_forward() {
    let solids = [
        WorldObj::wall(),
        WorldObj::key(Color::Red),
        WorldObj::ball(Color::Green),
        WorldObj::boxed(Color::Purple, None),
        WorldObj::door(Color::Blue, false, false),
        WorldObj::door(Color::Blue, false, true),
    ];
    for obj in solids {
        let mut env = facing(obj.clone());
        let r = env.step(Action::Forward);
        assert_eq!(env.agent_pos(), (1, 1), "{obj:?} should block");
        assert_eq!(r, 0.0);
        assert!(!env.done());
        assert_eq!(env.grid().get(2, 1), &obj, "blocked move leaves the cell alone");
    }
}

#[test]
fn passable_objects_let_agent_through() {
    for obj in [WorldObj::floor(Color::Blue), WorldObj::door(Color::Yellow, true, false)] {
        let mut env = facing(obj.clone());
        env.step(Action::Forward);
        assert_eq!(env.agent_pos(), (2, 1), "{obj:?} should be passable");
        assert!(!env.done());
    }
}

#[test]
fn corner_navigation() {
    let mut env = MiniGridEnv::from_task("empty_5x5").unwrap();

    env.step(Action::Forward); // (2,1)
    env.step(Action::Forward); // (3,1)
    env.step(Action::Left); // Face up

    env.step(Action::Forward);
    assert_eq!(env.agent_pos(), (3, 1));

    env.step(Action::Right);
    env.step(Action::Forward);
    assert_eq!(env.agent_pos(), (3, 1));

    env.step(Action::Right);
    env.step(Action::Forward);
    assert_eq!(env.agent_pos(), (3, 2));
}

#[test]
fn step_count_increases_by_one_per_step() {
    let mut env = MiniGridEnv::from_task("four_rooms").unwrap();
    let script = [Action::Forward, Action::Left, Action::Pickup, Action::Drop, Action::Toggle, Action::Done, Action::Right];
    for (i, a) in script.into_iter().enumerate() {
        env.step(a);
        assert_eq!(env.step_count(), i as u32 + 1);
    }
}

#[test]
fn four_rooms_gap_connects_rooms() {
    let mut env = MiniGridEnv::from_task("four_rooms").unwrap();
    // Walk right along row 1 until the vertical wall at x=9.
    for _ in 0..10 {
        env.step(Action::Forward);
    }
    assert_eq!(env.agent_pos(), (8, 1));
    // Down to the gap row 5, then through it.
    env.step(Action::Right);
    for _ in 0..4 {
        env.step(Action::Forward);
    }
    assert_eq!(env.agent_pos(), (8, 5));
    env.step(Action::Left);
    env.step(Action::Forward);
    env.step(Action::Forward);
    assert_eq!(env.agent_pos(), (10, 5));
}
