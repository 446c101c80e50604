//! Line-oriented front-end over stdin.
//!
//! Plain text starts a search. Commands:
//! `:open <n|id>`, `:cat body|patch|save`, `:help`, `:quit`.

use std::sync::Arc;

use anyhow::Result;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing::debug;

use galsearch_core::{
    Catalog, Category, Dispatch, SearchCoordinator, SearchEvent, SearchState, SessionState,
    TitleId,
};

use crate::render;

const HELP: &str = "\
<关键词>          搜索游戏
:open <序号|id>   查看资源
:cat body|patch|save  切换分类
:quit             退出";

pub async fn run(
    catalog: Arc<dyn Catalog>,
    coordinator: SearchCoordinator,
    mut events: mpsc::Receiver<SearchEvent>,
) -> Result<()> {
    let mut session = SessionState::new();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut state = coordinator.subscribe();

    println!("{}", HELP);

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else {
                    break;
                };
                if !handle_line(line.trim(), catalog.as_ref(), &coordinator, &mut session).await {
                    break;
                }
            }
            Some(event) = events.recv() => {
                handle_event(event, &mut session);
                // Next search line must not race the coordinator back to idle
                state.wait_for(SearchState::is_idle).await?;
            }
        }
    }

    // Print results of a search still in flight or already queued
    if !coordinator.state().is_idle() {
        if let Some(event) = events.recv().await {
            handle_event(event, &mut session);
        }
    }
    while let Ok(event) = events.try_recv() {
        handle_event(event, &mut session);
    }

    Ok(())
}

/// Returns false when the user asked to quit.
async fn handle_line(
    line: &str,
    catalog: &dyn Catalog,
    coordinator: &SearchCoordinator,
    session: &mut SessionState,
) -> bool {
    let (command, arg) = match line.split_once(char::is_whitespace) {
        Some((command, arg)) => (command, arg.trim()),
        None => (line, ""),
    };

    match command {
        "" => {}
        ":quit" | ":q" => return false,
        ":help" => println!("{}", HELP),
        ":open" => open(arg, catalog, session).await,
        ":cat" => match arg.parse::<Category>() {
            Ok(category) => {
                session.set_category(category);
                if session.selected().is_some() {
                    print!("{}", render::resources(category, &session.visible_resources()));
                }
            }
            Err(e) => println!("{}", e),
        },
        _ if command.starts_with(':') => println!("未知命令: {}\n{}", command, HELP),
        _ => match coordinator.request(line) {
            Dispatch::Started(id) => {
                debug!("Dispatched search {}", id);
                println!("搜索中...");
            }
            Dispatch::Busy => println!("搜索中，请稍候"),
            Dispatch::EmptyKeyword => {}
        },
    }
    true
}

/// Resolve `arg` as a 1-based result number, falling back to a title id.
fn resolve_title(arg: &str, session: &SessionState) -> TitleId {
    arg.parse::<usize>()
        .ok()
        .and_then(|n| n.checked_sub(1))
        .and_then(|i| session.titles().get(i))
        .map(|t| t.id.clone())
        .unwrap_or_else(|| TitleId::new(arg))
}

async fn open(arg: &str, catalog: &dyn Catalog, session: &mut SessionState) {
    if arg.is_empty() {
        println!("用法: :open <序号|id>");
        return;
    }

    let id = resolve_title(arg, session);
    match session.select(catalog, &id).await {
        Ok(title) => print!("{}", render::title_detail(title)),
        Err(e) => {
            println!("获取详情失败: {}", e);
            return;
        }
    }
    print!(
        "{}",
        render::resources(session.category(), &session.visible_resources())
    );
}

fn handle_event(event: SearchEvent, session: &mut SessionState) {
    debug!("Search {} delivered", event.search_id());
    if let Some(message) = event.user_message() {
        println!("{}", message);
    }
    if let SearchEvent::Completed { titles, .. } = event {
        print!("{}", render::titles(&titles));
        session.apply_results(titles);
    }
}
