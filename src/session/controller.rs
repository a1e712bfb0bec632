//! Game controller actor.
//!
//! Owns the single [`GameState`] of a session and everything time-related
//! around it: the delayed commit of an answered quiz and the one-second clock.
//! Every command and timer callback runs to completion on the actor context, so
//! the state is never touched by two triggers at once.

use actix::prelude::*;
use actix::MessageResult;
use log::{debug, info, warn};
use uuid::Uuid;

use crate::game::clock::ClockTick;
use crate::game::matrix::Matrix2;
use crate::game::quiz::Verdict;
use crate::game::state::GameState;
use crate::game::turn::TurnOutcome;
use crate::game::types::GameError;
use crate::session::messages::{
    CellClick, GetSnapshot, QuizSubmit, Reset, Resize, SnapshotUpdate, Subscribe,
};

pub struct GameController {
    state: GameState,
    subscribers: Vec<Recipient<SnapshotUpdate>>,
    commit_timer: Option<SpawnHandle>,
    clock_timer: Option<SpawnHandle>,
}

impl Actor for GameController {
    type Context = Context<Self>;

    fn started(&mut self, ctx: &mut Self::Context) {
        info!(
            "[GameController] Started round {} ({}x{} board, {}s)",
            self.state.round_id(),
            self.state.board().size(),
            self.state.board().size(),
            self.state.time_remaining()
        );
        self.start_clock(ctx);
    }
}

impl GameController {
    pub fn new(state: GameState) -> Self {
        Self {
            state,
            subscribers: Vec::new(),
            commit_timer: None,
            clock_timer: None,
        }
    }

    /// Push the current snapshot to every live subscriber.
    fn broadcast(&mut self) {
        let update = SnapshotUpdate { snapshot: self.state.snapshot() };
        self.subscribers.retain(|recipient| recipient.connected());
        for recipient in &self.subscribers {
            recipient.do_send(update.clone());
        }
    }

    fn start_clock(&mut self, ctx: &mut Context<Self>) {
        self.stop_clock(ctx);
        let interval = self.state.config().tick_interval;
        let handle = ctx.run_interval(interval, |act, ctx| {
            act.on_tick(ctx);
        });
        self.clock_timer = Some(handle);
    }

    fn stop_clock(&mut self, ctx: &mut Context<Self>) {
        if let Some(handle) = self.clock_timer.take() {
            ctx.cancel_future(handle);
        }
    }

    fn cancel_commit(&mut self, ctx: &mut Context<Self>) {
        if let Some(handle) = self.commit_timer.take() {
            ctx.cancel_future(handle);
            debug!("[GameController] Pending commit cancelled");
        }
    }

    fn on_tick(&mut self, ctx: &mut Context<Self>) {
        match self.state.tick() {
            ClockTick::Running(_) => self.broadcast(),
            ClockTick::Expired => {
                info!(
                    "[GameController] Time is up for round {}, winner: {:?}",
                    self.state.round_id(),
                    self.state.winner()
                );
                self.cancel_commit(ctx);
                self.stop_clock(ctx);
                self.broadcast();
            }
            ClockTick::Stopped => self.stop_clock(ctx),
        }
    }

    /// Commit the verdict once its feedback message has been on screen long enough.
    fn schedule_commit(&mut self, verdict: Verdict, ctx: &mut Context<Self>) {
        self.cancel_commit(ctx);
        let round_id = self.state.round_id();
        let delay = verdict.delay(self.state.config());
        let handle = ctx.run_later(delay, move |act, ctx| {
            act.commit_timer = None;
            act.commit(round_id, ctx);
        });
        self.commit_timer = Some(handle);
    }

    fn commit(&mut self, round_id: Uuid, ctx: &mut Context<Self>) {
        if self.state.round_id() != round_id {
            warn!("[GameController] Dropping commit scheduled for stale round {}", round_id);
            return;
        }
        if let Some(outcome) = self.state.commit_pending() {
            if let TurnOutcome::GameOver(winner) = outcome.turn {
                info!("[GameController] Board full for round {}, winner: {:?}", round_id, winner);
                self.stop_clock(ctx);
            }
        }
        self.broadcast();
    }

    fn restart(&mut self, ctx: &mut Context<Self>) {
        self.cancel_commit(ctx);
        self.start_clock(ctx);
        self.broadcast();
    }
}

impl Handler<CellClick> for GameController {
    type Result = Result<Matrix2, GameError>;

    fn handle(&mut self, msg: CellClick, _: &mut Context<Self>) -> Self::Result {
        match self.state.click(msg.row, msg.col) {
            Ok(challenge) => {
                self.broadcast();
                Ok(challenge.matrix)
            }
            Err(err) => {
                debug!("[GameController] Click ({}, {}) ignored: {}", msg.row, msg.col, err);
                Err(err)
            }
        }
    }
}

impl Handler<QuizSubmit> for GameController {
    type Result = Result<Verdict, GameError>;

    fn handle(&mut self, msg: QuizSubmit, ctx: &mut Context<Self>) -> Self::Result {
        match self.state.submit(msg.answer) {
            Ok(verdict) => {
                self.schedule_commit(verdict, ctx);
                self.broadcast();
                Ok(verdict)
            }
            Err(err) => {
                debug!("[GameController] Answer {:?} ignored: {}", msg.answer, err);
                Err(err)
            }
        }
    }
}

impl Handler<Resize> for GameController {
    type Result = Result<(), GameError>;

    fn handle(&mut self, msg: Resize, ctx: &mut Context<Self>) -> Self::Result {
        if let Err(err) = self.state.resize(msg.size) {
            warn!("[GameController] Resize rejected: {}", err);
            return Err(err);
        }
        self.restart(ctx);
        Ok(())
    }
}

impl Handler<Reset> for GameController {
    type Result = ();

    fn handle(&mut self, _: Reset, ctx: &mut Context<Self>) -> Self::Result {
        self.state.reset();
        self.restart(ctx);
    }
}

impl Handler<GetSnapshot> for GameController {
    type Result = MessageResult<GetSnapshot>;

    fn handle(&mut self, _: GetSnapshot, _: &mut Context<Self>) -> Self::Result {
        MessageResult(self.state.snapshot())
    }
}

impl Handler<Subscribe> for GameController {
    type Result = ();

    fn handle(&mut self, msg: Subscribe, _: &mut Context<Self>) -> Self::Result {
        msg.recipient.do_send(SnapshotUpdate { snapshot: self.state.snapshot() });
        self.subscribers.push(msg.recipient);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use actix::clock::sleep;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use crate::config::GameConfig;
    use crate::game::quiz::QuizAnswer;
    use crate::game::state::Snapshot;
    use crate::game::types::{Cell, Player, Score, Winner};

    fn test_config(bomb_probability: f64) -> GameConfig {
        GameConfig {
            bomb_probability,
            correct_answer_delay: Duration::from_millis(20),
            wrong_answer_delay: Duration::from_millis(30),
            tick_interval: Duration::from_secs(3600),
            ..GameConfig::default()
        }
    }

    fn start(config: GameConfig) -> Addr<GameController> {
        GameController::new(GameState::with_rng(config, StdRng::seed_from_u64(99))).start()
    }

    async fn answer_correctly(addr: &Addr<GameController>, row: usize, col: usize) -> Verdict {
        let matrix = addr.send(CellClick { row, col }).await.unwrap().unwrap();
        let answer = QuizAnswer::Value(i64::from(matrix.determinant()));
        addr.send(QuizSubmit { answer }).await.unwrap().unwrap()
    }

    struct Recorder {
        updates: Vec<Snapshot>,
    }

    impl Actor for Recorder {
        type Context = Context<Self>;
    }

    impl Handler<SnapshotUpdate> for Recorder {
        type Result = ();

        fn handle(&mut self, msg: SnapshotUpdate, _: &mut Context<Self>) -> Self::Result {
            self.updates.push(msg.snapshot);
        }
    }

    #[derive(Message)]
    #[rtype(result = "Vec<Snapshot>")]
    struct Recorded;

    impl Handler<Recorded> for Recorder {
        type Result = MessageResult<Recorded>;

        fn handle(&mut self, _: Recorded, _: &mut Context<Self>) -> Self::Result {
            MessageResult(self.updates.clone())
        }
    }

    #[actix::test]
    async fn test_correct_answer_commits_after_delay() {
        let addr = start(test_config(0.0));
        assert_eq!(answer_correctly(&addr, 0, 0).await, Verdict::Correct);

        let before = addr.send(GetSnapshot).await.unwrap();
        assert_eq!(before.painted, 0);
        assert_eq!(before.quiz.unwrap().message.as_deref(), Some("Correct answer!"));

        sleep(Duration::from_millis(100)).await;
        let after = addr.send(GetSnapshot).await.unwrap();
        assert_eq!(after.cells[0], Cell::Owned(Player::A));
        assert_eq!(after.score, Score { a: 1, b: 0 });
        assert_eq!(after.turn, Some(Player::B));
        assert!(after.quiz.is_none());
    }

    #[actix::test]
    async fn test_bomb_commits_block() {
        let addr = start(test_config(1.0));
        assert_eq!(answer_correctly(&addr, 2, 2).await, Verdict::Bomb);
        sleep(Duration::from_millis(100)).await;
        let snapshot = addr.send(GetSnapshot).await.unwrap();
        assert_eq!(snapshot.painted, 4);
        assert_eq!(snapshot.score.a, 4);
        assert_eq!(snapshot.turn, Some(Player::B));
    }

    #[actix::test]
    async fn test_second_answer_is_ignored() {
        let addr = start(test_config(0.0));
        addr.send(CellClick { row: 1, col: 1 }).await.unwrap().unwrap();
        let first = addr.send(QuizSubmit { answer: QuizAnswer::Invalid }).await.unwrap();
        assert!(matches!(first, Ok(Verdict::Wrong { .. })));
        let second = addr.send(QuizSubmit { answer: QuizAnswer::Value(0) }).await.unwrap();
        assert_eq!(second, Err(GameError::AnswerAlreadySubmitted));
        let click = addr.send(CellClick { row: 2, col: 2 }).await.unwrap();
        assert_eq!(click, Err(GameError::QuizOpen));

        sleep(Duration::from_millis(100)).await;
        let snapshot = addr.send(GetSnapshot).await.unwrap();
        assert_eq!(snapshot.painted, 0);
        assert_eq!(snapshot.turn, Some(Player::B));
    }

    #[actix::test]
    async fn test_reset_discards_pending_commit() {
        let addr = start(test_config(0.0));
        let round = addr.send(GetSnapshot).await.unwrap().round_id;
        answer_correctly(&addr, 0, 0).await;
        addr.send(Reset).await.unwrap();

        sleep(Duration::from_millis(100)).await;
        let snapshot = addr.send(GetSnapshot).await.unwrap();
        assert_ne!(snapshot.round_id, round);
        assert_eq!(snapshot.painted, 0);
        assert_eq!(snapshot.turn, Some(Player::A));
        assert!(snapshot.quiz.is_none());
    }

    #[actix::test]
    async fn test_resize() {
        let addr = start(test_config(0.0));
        addr.send(Resize { size: 4 }).await.unwrap().unwrap();
        let snapshot = addr.send(GetSnapshot).await.unwrap();
        assert_eq!(snapshot.size, 4);
        assert_eq!(snapshot.cells.len(), 16);

        let rejected = addr.send(Resize { size: 12 }).await.unwrap();
        assert_eq!(rejected, Err(GameError::InvalidGridSize(12)));
        assert_eq!(addr.send(GetSnapshot).await.unwrap().size, 4);
    }

    #[actix::test]
    async fn test_clock_expiry_ends_game() {
        let config = GameConfig {
            time_budget_secs: 3,
            tick_interval: Duration::from_millis(10),
            ..test_config(0.0)
        };
        let addr = start(config);
        sleep(Duration::from_millis(200)).await;

        let snapshot = addr.send(GetSnapshot).await.unwrap();
        assert_eq!(snapshot.time_remaining, 0);
        assert_eq!(snapshot.winner, Some(Winner::Draw));
        let click = addr.send(CellClick { row: 0, col: 0 }).await.unwrap();
        assert_eq!(click, Err(GameError::GameOver));

        addr.send(Reset).await.unwrap();
        let snapshot = addr.send(GetSnapshot).await.unwrap();
        assert_eq!(snapshot.winner, None);
        assert!(snapshot.time_remaining >= 2);
    }

    #[actix::test]
    async fn test_subscribers_receive_updates() {
        let addr = start(test_config(0.0));
        let recorder = Recorder { updates: Vec::new() }.start();
        addr.send(Subscribe { recipient: recorder.clone().recipient() }).await.unwrap();
        addr.send(CellClick { row: 0, col: 0 }).await.unwrap().unwrap();
        addr.send(QuizSubmit { answer: QuizAnswer::Invalid }).await.unwrap().unwrap();
        sleep(Duration::from_millis(100)).await;

        let updates = recorder.send(Recorded).await.unwrap();
        assert_eq!(updates.len(), 4);
        assert!(updates[0].quiz.is_none());
        assert!(updates[1].quiz.as_ref().unwrap().message.is_none());
        assert!(updates[2].quiz.as_ref().unwrap().message.as_deref().unwrap().starts_with("Wrong answer"));
        assert!(updates[3].quiz.is_none());
        assert_eq!(updates[3].turn, Some(Player::B));
    }
}
