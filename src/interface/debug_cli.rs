//! 文字 CLI：读取 stdin → 解析命令 → 转成按钮 / 拖放 / 双击事件

use bevy::app::AppExit;
use bevy::prelude::*;
use once_cell::sync::Lazy;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use crate::core::{events::LogEvent, states::AppState};
use crate::data::Catalog;
use crate::inventory::components::{BagId, Bags};
use crate::inventory::InventorySystems;
use crate::inventory::events::{GestureEvent, ShowBagsEvent};
use crate::inventory::transfer::SlotRef;

static CLI_BUFFER: Lazy<Arc<Mutex<VecDeque<String>>>> =
    Lazy::new(|| Arc::new(Mutex::new(VecDeque::new())));

const HELP: &str = "命令列表:
  help                         查看帮助
  status                       查看当前状态
  exit / quit                  退出程序
  items [token]                列出物品表 / 用 id、uuid、名称查询
  open                         Open Chest
  clear                        Clear Inventory
  show                         显示背包与宝箱
  drag <bag> <slot>            在某格按下开始拖拽
  drop <bag> <slot>            在某格松开
  cancel                       取消拖拽
  move <bag> <slot> <bag> <slot>  拖拽并放下
  dclick <bag> <slot>          双击某格
  dump                         以 JSON 打印两个背包
<bag> = inv | chest";

/// 插件入口
pub struct DebugCliPlugin;
impl Plugin for DebugCliPlugin {
    fn build(&self, app: &mut App) {
        {
            let buffer = CLI_BUFFER.clone();
            std::thread::spawn(move || {
                use std::io::{self, BufRead};
                let stdin = io::stdin();
                for line in stdin.lock().lines().map_while(Result::ok) {
                    let line = line.trim();
                    if line.is_empty() {
                        continue;
                    }
                    match buffer.lock() {
                        Ok(mut buf) => buf.push_back(line.to_string()),
                        Err(_) => break,
                    }
                }
            });
        }
        app
            // 事件：原始输入行
            .add_event::<CliLine>()
            // 每帧从 buffer 取出所有命令行写入事件
            .add_systems(Update, read_stdin)
            // 仅在 InGame 处理命令
            .add_systems(
                Update,
                execute_cli_commands
                    .after(read_stdin)
                    .before(InventorySystems)
                    .run_if(in_state(AppState::InGame)),
            );
    }
}

/* ---------------------------- 事件与枚举 ---------------------------- */

/// 终端敲的一整行
#[derive(Event)]
struct CliLine(String);

/// 我们支持的命令
#[derive(Debug, PartialEq)]
enum Command {
    Help,
    Status,
    Exit,
    Items(Option<String>), // None=全部；Some(token)=按 id/uuid/name 查询
    Open,
    Clear,
    Show,
    Drag(SlotRef),
    Drop(SlotRef),
    Cancel,
    Move { from: SlotRef, to: SlotRef },
    DoubleClick(SlotRef),
    Dump,
    Invalid(String),
    Unsupported(String),
}

/* ---------------------------- 读取 stdin ---------------------------- */

fn read_stdin(mut writer: EventWriter<CliLine>) {
    let Ok(mut buffer) = CLI_BUFFER.lock() else {
        return;
    };
    while let Some(line) = buffer.pop_front() {
        writer.write(CliLine(line));
    }
}

/* ---------------------------- 命令执行 ---------------------------- */

fn execute_cli_commands(
    mut line_reader: EventReader<CliLine>,
    mut app_exit: EventWriter<AppExit>,
    mut log: EventWriter<LogEvent>,
    state: Res<State<AppState>>,
    catalog: Res<Catalog>,
    bags: Res<Bags>,
    mut ev_gesture: EventWriter<GestureEvent>,
    mut ev_show: EventWriter<ShowBagsEvent>,
) {
    for CliLine(input) in line_reader.read() {
        match parse_command(input) {
            Command::Help => {
                log.write(LogEvent(HELP.into()));
            }

            Command::Status => {
                log.write(LogEvent(format!(
                    "State: {:?}, Catalog: {}, Inventory: {}/{}, Chest: {}/{}, Total: {}",
                    state.get(),
                    catalog.len(),
                    bags.inventory.len(),
                    bags.inventory.capacity(),
                    bags.chest.len(),
                    bags.chest.capacity(),
                    bags.total(),
                )));
            }

            Command::Exit => {
                log.write(LogEvent("Bye~".into()));
                app_exit.write(AppExit::Success);
            }

            Command::Items(None) if catalog.is_empty() => {
                log.write(LogEvent("物品表为空".into()));
            }

            Command::Items(None) => {
                for kind in catalog.kinds() {
                    let tag = if kind.stackable { " (stackable)" } else { "" };
                    log.write(LogEvent(format!(
                        "{} | {} | {}{tag}",
                        kind.uuid(),
                        kind.id,
                        kind.name
                    )));
                }
            }

            Command::Items(Some(token)) => match catalog.find(&token) {
                Some(kind) => {
                    log.write(LogEvent(format!(
                        "==================================================
UUID      : {}
ID        : {}
Name      : {}
Stackable : {}
==================================================",
                        kind.uuid(),
                        kind.id,
                        kind.name,
                        kind.stackable
                    )));
                }
                None => {
                    log.write(LogEvent("未找到匹配物品".into()));
                }
            },

            Command::Open => {
                ev_gesture.write(GestureEvent::Open);
            }

            Command::Clear => {
                ev_gesture.write(GestureEvent::Clear);
            }

            Command::Show => {
                ev_show.write(ShowBagsEvent);
            }

            Command::Drag(at) => {
                ev_gesture.write(GestureEvent::DragStart(at));
            }

            Command::Drop(at) => {
                ev_gesture.write(GestureEvent::Drop(at));
            }

            Command::Cancel => {
                ev_gesture.write(GestureEvent::Cancel);
            }

            Command::Move { from, to } => {
                ev_gesture.write(GestureEvent::DragStart(from));
                ev_gesture.write(GestureEvent::Drop(to));
            }

            Command::DoubleClick(at) => {
                ev_gesture.write(GestureEvent::DoubleClick(at));
            }

            Command::Dump => match serde_json::to_string_pretty(&*bags) {
                Ok(json) => println!("{json}"),
                Err(err) => warn!("无法序列化背包: {err}"),
            },

            Command::Invalid(msg) => {
                log.write(LogEvent(msg));
            }

            Command::Unsupported(cmd) => {
                log.write(LogEvent(format!("不支持的命令: {cmd}")));
            }
        }
    }
}

/* ---------------------------- 工具函数 ---------------------------- */

fn parse_command(input: &str) -> Command {
    let mut parts = input.split_whitespace();
    let cmd = parts.next().unwrap_or("").to_lowercase();
    let parsed = match cmd.as_str() {
        "help" | "h" | "?" => Ok(Command::Help),
        "status" | "s" => Ok(Command::Status),
        "exit" | "quit" | "q" => Ok(Command::Exit),
        "items" | "item" => Ok(Command::Items(parts.next().map(|s| s.to_string()))),
        "open" => Ok(Command::Open),
        "clear" => Ok(Command::Clear),
        "show" | "ls" => Ok(Command::Show),
        "drag" => parse_slot(&mut parts).map(Command::Drag),
        "drop" => parse_slot(&mut parts).map(Command::Drop),
        "cancel" => Ok(Command::Cancel),
        "move" | "mv" => parse_slot(&mut parts)
            .and_then(|from| parse_slot(&mut parts).map(|to| Command::Move { from, to })),
        "dclick" | "dc" => parse_slot(&mut parts).map(Command::DoubleClick),
        "dump" => Ok(Command::Dump),
        other => Ok(Command::Unsupported(other.into())),
    };
    parsed.unwrap_or_else(Command::Invalid)
}

/// `<bag> <slot>`
fn parse_slot<'a>(parts: &mut impl Iterator<Item = &'a str>) -> Result<SlotRef, String> {
    let bag_token = parts.next().ok_or("缺少背包名 (inv / chest)")?;
    let bag = BagId::parse(bag_token).ok_or_else(|| format!("未知背包: {bag_token}"))?;
    let slot_token = parts.next().ok_or("缺少格子下标")?;
    let slot = slot_token
        .parse()
        .map_err(|_| format!("无效的格子下标: {slot_token}"))?;
    Ok(SlotRef::new(bag, slot))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::resources::GameConfig;
    use crate::inventory::InventoryPlugin;
    use bevy::state::app::StatesPlugin;

    /// 不启动 stdin 线程，直接把命令行作为 CliLine 写入
    fn cli_app() -> App {
        let mut app = App::new();
        app.add_plugins((MinimalPlugins, StatesPlugin))
            .insert_resource(GameConfig {
                chest_seed: Some(11),
                ..default()
            })
            .init_resource::<Catalog>()
            .add_event::<LogEvent>()
            .add_event::<CliLine>()
            .insert_state(AppState::InGame)
            .add_plugins(InventoryPlugin)
            .add_systems(
                Update,
                execute_cli_commands.before(InventorySystems),
            );
        app.update();
        app
    }

    fn type_lines(app: &mut App, lines: &[&str]) {
        for line in lines {
            app.world_mut().send_event(CliLine(line.to_string()));
        }
        app.update();
    }

    #[test]
    fn several_moves_in_one_frame_keep_their_order() {
        let mut app = cli_app();
        type_lines(&mut app, &["open"]);
        let chest = app.world().resource::<Bags>().chest.slot_snapshot();

        type_lines(&mut app, &["move chest 0 inv 0", "move chest 1 inv 1"]);

        let bags = app.world().resource::<Bags>();
        assert_eq!(bags.inventory.get(0), chest[0].as_ref());
        assert_eq!(bags.inventory.get(1), chest[1].as_ref());
        assert_eq!(bags.chest.get(0), None);
        assert_eq!(bags.chest.get(1), None);
        assert_eq!(bags.chest.get(2), chest[2].as_ref());
    }

    #[test]
    fn dclick_then_open_in_one_frame() {
        let mut app = cli_app();
        type_lines(&mut app, &["open"]);
        let taken = app.world().resource::<Bags>().chest.get(0).cloned();

        type_lines(&mut app, &["dclick chest 0", "open"]);

        let bags = app.world().resource::<Bags>();
        assert_eq!(bags.inventory.get(0), taken.as_ref());
        assert!(bags.chest.is_full());
    }

    #[test]
    fn parses_buttons() {
        assert_eq!(parse_command("open"), Command::Open);
        assert_eq!(parse_command("  CLEAR "), Command::Clear);
        assert_eq!(parse_command("quit"), Command::Exit);
    }

    #[test]
    fn parses_gestures() {
        assert_eq!(
            parse_command("drag chest 2"),
            Command::Drag(SlotRef::new(BagId::Chest, 2))
        );
        assert_eq!(
            parse_command("move chest 0 inv 11"),
            Command::Move {
                from: SlotRef::new(BagId::Chest, 0),
                to: SlotRef::new(BagId::Inventory, 11),
            }
        );
        assert_eq!(
            parse_command("dc inventory 3"),
            Command::DoubleClick(SlotRef::new(BagId::Inventory, 3))
        );
    }

    #[test]
    fn bad_arguments_are_reported() {
        assert!(matches!(parse_command("drag"), Command::Invalid(_)));
        assert!(matches!(parse_command("drop box 1"), Command::Invalid(_)));
        assert!(matches!(parse_command("dclick inv -1"), Command::Invalid(_)));
        assert!(matches!(parse_command("move chest 0 inv"), Command::Invalid(_)));
    }

    #[test]
    fn items_token_and_unknown() {
        assert_eq!(
            parse_command("items boots"),
            Command::Items(Some("boots".into()))
        );
        assert_eq!(parse_command("items"), Command::Items(None));
        assert_eq!(
            parse_command("equip weapon 0"),
            Command::Unsupported("equip".into())
        );
    }
}
