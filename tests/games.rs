use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use proptest::prelude::*;
use ratatui::backend::TestBackend;
use ratatui::Terminal;

use termarcade::games::pong::{Pong, PongConfig, Side};
use termarcade::games::snake::{Snake, SnakeConfig};
use termarcade::games::zombies::{Outcome, ZombieAttack, ZombieConfig};
use termarcade::games::{Game, Phase, Point};
use termarcade::rng::GameRng;

fn press(game: &mut dyn Game, code: KeyCode) {
    game.handle_input(KeyEvent::new(code, KeyModifiers::NONE));
}

fn screen_text(game: &mut dyn Game, width: u16, height: u16) -> String {
    let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
    terminal.draw(|f| game.render(f, f.area())).unwrap();
    terminal
        .backend()
        .buffer()
        .content
        .iter()
        .map(|cell| cell.symbol())
        .collect()
}

/// Sends the ball past the left paddle so the right player scores.
fn concede_left(pong: &mut Pong) {
    pong.set_ball(Point::new(2, 3), -1, 0);
    pong.update();
    pong.update();
}

#[test]
fn pong_match_ends_exactly_at_the_win_score() {
    let mut pong = Pong::with_size(PongConfig::default(), 40, 20);

    concede_left(&mut pong);
    concede_left(&mut pong);
    assert_eq!(pong.scores(), (0, 2));
    assert_eq!(pong.phase(), Phase::Running);

    concede_left(&mut pong);
    assert_eq!(pong.scores(), (0, 3));
    assert_eq!(pong.phase(), Phase::GameOver);
    assert_eq!(pong.winner(), Some(Side::Right));

    // Nothing moves once the match is decided
    let ball = pong.ball();
    pong.update();
    assert_eq!(pong.ball(), ball);

    let text = screen_text(&mut pong, 60, 30);
    assert!(text.contains("Player 2 Wins!"));

    press(&mut pong, KeyCode::Char('r'));
    assert_eq!(pong.scores(), (0, 0));
    assert_eq!(pong.phase(), Phase::Running);
}

#[test]
fn pong_paddle_returns_the_ball() {
    let mut pong = Pong::with_size(PongConfig::default(), 40, 20);
    let (left, _) = pong.paddles();
    pong.set_ball(Point::new(2, left + 1), -1, 0);
    pong.update();
    assert_eq!(pong.ball_velocity().0, 1);
    assert_eq!(pong.scores(), (0, 0));
}

#[test]
fn zombie_hit_does_not_depend_on_horde_order() {
    let config = ZombieConfig::default();
    let mut game = ZombieAttack::new(config, GameRng::new(4));
    game.set_zombies(&[Point::new(30, 2), Point::new(5, 3)]);
    game.set_bullets(&[Point::new(5, 5)]);

    game.update();
    assert_eq!(game.zombies().len(), 1);
    assert_eq!(game.zombies()[0].position, Point::new(30, 3));
    assert!(game.bullets().is_empty());
    assert_eq!(game.get_score(), 1);
}

#[test]
fn clearing_the_horde_wins() {
    let mut game = ZombieAttack::new(ZombieConfig::default(), GameRng::new(4));
    game.set_zombies(&[Point::new(5, 3)]);
    game.set_bullets(&[Point::new(5, 5)]);
    game.update();
    assert_eq!(game.outcome(), Some(Outcome::Survived));
    assert!(game.is_game_over());
}

#[test]
fn zombies_reaching_the_bottom_cost_health_until_overrun() {
    let config = ZombieConfig::default();
    let bottom = config.height - 2;
    let mut game = ZombieAttack::new(config, GameRng::new(4));
    game.set_zombies(&[Point::new(3, bottom), Point::new(6, bottom), Point::new(9, bottom)]);
    game.update();
    assert_eq!(game.health(), 0);
    assert_eq!(game.outcome(), Some(Outcome::Overrun));
}

#[test]
fn small_terminals_get_a_message_instead_of_a_board() {
    let mut snake = Snake::new(SnakeConfig::default(), GameRng::new(1));
    assert!(screen_text(&mut snake, 30, 10).contains("Terminal too small"));
    assert!(!screen_text(&mut snake, 80, 30).contains("Terminal too small"));
}

proptest! {
    #[test]
    fn snake_food_stays_inside_the_walls(seed in any::<u64>(), width in 14i32..60, height in 12i32..40) {
        let config = SnakeConfig { width, height, ..SnakeConfig::default() };
        let mut snake = Snake::new(config, GameRng::new(seed));
        for _ in 0..20 {
            snake.relocate_food();
            let food = snake.food();
            prop_assert!((1..=width - 2).contains(&food.x));
            prop_assert!((1..=height - 2).contains(&food.y));
            prop_assert!(!snake.body().contains(&food));
        }
    }

    #[test]
    fn same_seed_spawns_the_same_horde(seed in any::<u64>()) {
        let a = ZombieAttack::new(ZombieConfig::default(), GameRng::new(seed));
        let b = ZombieAttack::new(ZombieConfig::default(), GameRng::new(seed));
        prop_assert_eq!(a.zombies(), b.zombies());
        for z in a.zombies() {
            prop_assert!(z.alive);
            prop_assert!(z.position.y >= 1 && z.position.y < 10);
        }
    }
}
