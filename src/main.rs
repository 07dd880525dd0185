//! リバーシCLIのエントリポイント
//! 設定読み込み、ログ初期化を行い、標準入力のコマンドで対局を進める。

use std::sync::Arc;

use reversi::{
    ai::LocalSearchService,
    config::{parse_control_type, Config},
    game::{placements, ControlType, Player, Position, MAX_PLACEMENTS},
    session::{GameSession, SearchResolution, TurnOrchestrator, TurnState},
};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

const HELP: &str = "commands: <A-H><1-8> | undo | redo | hint | reset | log | depth <n> | black|white human|computer | quit";

/// 設定に従ってtracingのサブスクライバを初期化する
fn init_logging(config: &Config) {
    let filter = EnvFilter::try_new(&config.logging.level).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(config.logging.with_target)
        .with_writer(std::io::stderr)
        .init();
}

fn print_status(orchestrator: &TurnOrchestrator, state: TurnState) {
    let session = orchestrator.session();
    let (black, white) = session.stone_counts();

    println!("{}", session.board().display());
    println!(
        "Black {} - White {}  ({}/{} placed)",
        black,
        white,
        placements(session.board()),
        MAX_PLACEMENTS
    );

    match session.result_text() {
        Some(text) => println!("{}", text),
        None => {
            let moves: Vec<String> = session.valid_moves().iter().map(Position::notation).collect();
            println!("{} to move [{}]", session.current_player().label(), moves.join(" "));
        }
    }

    if state == TurnState::Browsing {
        println!("(viewing move {} of {})", session.history().cursor(), session.history().len() - 1);
    }
}

fn print_log(orchestrator: &TurnOrchestrator) {
    for (index, entry) in orchestrator.session().move_log().iter().enumerate() {
        println!("{:>3}. {}", index + 1, entry);
    }
}

fn parse_player(text: &str) -> Option<Player> {
    match text {
        "black" => Some(Player::Black),
        "white" => Some(Player::White),
        _ => None,
    }
}

/// 1行分のコマンドを実行する。終了要求ならfalse
async fn execute(orchestrator: &mut TurnOrchestrator, line: &str) -> bool {
    let words: Vec<String> = line.split_whitespace().map(str::to_lowercase).collect();
    let words: Vec<&str> = words.iter().map(String::as_str).collect();

    match words.as_slice() {
        [] => {}
        ["quit"] | ["exit"] => return false,
        ["undo"] => {
            orchestrator.undo();
        }
        ["redo"] => {
            orchestrator.redo();
        }
        ["reset"] => {
            orchestrator.reset();
        }
        ["log"] => print_log(orchestrator),
        ["hint"] => match orchestrator.request_hint() {
            Ok(()) => {
                if let Some((SearchResolution::HintReady(hint), _)) = orchestrator.next_resolution().await {
                    match hint {
                        Some(position) => println!("hint: {}", position.notation()),
                        None => println!("hint: none"),
                    }
                }
            }
            Err(e) => println!("{}", e),
        },
        ["depth", value] => match value.parse() {
            Ok(depth) => {
                if let Err(e) = orchestrator.set_search_depth(depth) {
                    println!("{}", e);
                }
            }
            Err(_) => println!("invalid depth: {}", value),
        },
        [player, control] if parse_player(player).is_some() => match (parse_player(player), parse_control_type(control)) {
            (Some(player), Some(control)) => {
                orchestrator.set_control(player, control);
            }
            _ => println!("{}", HELP),
        },
        [text] => match Position::parse_notation(text) {
            Some(position) => {
                if let Err(e) = orchestrator.place(position) {
                    println!("{}", e);
                }
            }
            None => println!("{}", HELP),
        },
        _ => println!("{}", HELP),
    }

    true
}

#[tokio::main]
async fn main() {
    // 設定ファイルと環境変数から統合設定を読み込み
    let config = match Config::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("設定エラー: {}", e);
            std::process::exit(1);
        }
    };
    if let Err(e) = config.validate() {
        eprintln!("設定エラー: {}", e);
        std::process::exit(1);
    }

    init_logging(&config);
    tracing::info!(
        depth = config.engine.search_depth,
        black = ?config.engine.black,
        white = ?config.engine.white,
        "configuration loaded"
    );

    let session = match GameSession::from_config(&config) {
        Ok(session) => session,
        Err(e) => {
            eprintln!("対局作成失敗: {}", e);
            std::process::exit(1);
        }
    };

    let mut orchestrator = TurnOrchestrator::new(session, Arc::new(LocalSearchService::new()));
    let mut state = orchestrator.run_until_idle().await;
    print_status(&orchestrator, state);

    // コンピュータ同士の対局は棋譜を出力して終了
    let unattended = [Player::Black, Player::White]
        .iter()
        .all(|player| orchestrator.session().control(*player) == ControlType::Computer);
    if unattended && state == TurnState::Finished {
        print_log(&orchestrator);
        return;
    }

    println!("{}", HELP);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Ok(Some(line)) = lines.next_line().await {
        if !execute(&mut orchestrator, line.trim()).await {
            break;
        }

        state = orchestrator.run_until_idle().await;
        print_status(&orchestrator, state);
    }
}
