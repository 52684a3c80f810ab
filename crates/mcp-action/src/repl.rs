//! Interactive console for the action.
//!
//! Launch with `mcp-action repl`. Every command is sent as a JSON-RPC POST
//! through the same adapter the serverless runtime calls. Type `/help` for
//! commands, Tab for completion.

use futures::executor::block_on;
use rustyline::completion::{Completer, Pair};
use rustyline::config::CompletionType;
use rustyline::error::ReadlineError;
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::validate::Validator;
use rustyline::{
    Cmd, ConditionalEventHandler, Config, Editor, Event, EventContext, EventHandler, Helper,
    KeyEvent, RepeatCount,
};
use serde_json::{json, Value};

use mcp_action_core::ProjectOptions;

use crate::registry::CapabilityRegistry;
use crate::transport::{ActionEvent, ActionHandler};
use crate::types::JsonRpcRequest;

const COMMANDS: &[(&str, &str)] = &[
    ("/tools", "List tools"),
    ("/call", "Call a tool: /call <name> [json arguments]"),
    ("/resources", "List resources"),
    ("/read", "Read a resource: /read <uri>"),
    ("/prompts", "List prompts"),
    ("/prompt", "Expand a prompt: /prompt <name> [json arguments]"),
    ("/health", "Run the GET health check"),
    ("/raw", "Send a raw JSON-RPC body"),
    ("/info", "Show server info and capabilities"),
    ("/clear", "Clear the screen"),
    ("/help", "Show available commands"),
    ("/exit", "Quit the console"),
];

/// Tab completion for commands and capability names.
struct ActionHelper {
    tools: Vec<String>,
    resources: Vec<String>,
    prompts: Vec<String>,
}

impl ActionHelper {
    fn new(options: &ProjectOptions) -> Self {
        let registry = CapabilityRegistry::build(options);
        Self {
            tools: registry.tools.names().iter().map(|s| s.to_string()).collect(),
            resources: registry
                .resources
                .list_resources()
                .into_iter()
                .map(|r| r.uri)
                .collect(),
            prompts: registry
                .prompts
                .list_prompts()
                .into_iter()
                .map(|p| p.name)
                .collect(),
        }
    }

    fn candidates(&self, cmd: &str) -> &[String] {
        match cmd {
            "/call" => &self.tools[..],
            "/read" => &self.resources[..],
            "/prompt" => &self.prompts[..],
            _ => &[],
        }
    }
}

impl Completer for ActionHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &rustyline::Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let input = &line[..pos];

        let Some((cmd, arg)) = input.split_once(' ') else {
            let matches = COMMANDS
                .iter()
                .filter(|(cmd, _)| cmd.starts_with(input))
                .map(|(cmd, desc)| Pair {
                    display: format!("{cmd:<12} {desc}"),
                    replacement: format!("{cmd} "),
                })
                .collect();
            return Ok((0, matches));
        };

        if arg.contains(' ') {
            return Ok((pos, Vec::new()));
        }

        let matches = self
            .candidates(cmd)
            .iter()
            .filter(|name| name.starts_with(arg))
            .map(|name| Pair {
                display: name.clone(),
                replacement: format!("{name} "),
            })
            .collect();
        Ok((cmd.len() + 1, matches))
    }
}

impl Hinter for ActionHelper {
    type Hint = String;

    fn hint(&self, line: &str, pos: usize, _ctx: &rustyline::Context<'_>) -> Option<String> {
        if pos < line.len() || !line.starts_with('/') || line.contains(' ') {
            return None;
        }
        COMMANDS
            .iter()
            .find(|(cmd, _)| cmd.starts_with(line) && *cmd != line)
            .map(|(cmd, _)| cmd[line.len()..].to_string())
    }
}

impl Highlighter for ActionHelper {}
impl Validator for ActionHelper {}
impl Helper for ActionHelper {}

struct TabCompleteOrAcceptHint;

impl ConditionalEventHandler for TabCompleteOrAcceptHint {
    fn handle(
        &self,
        _evt: &Event,
        _n: RepeatCount,
        _positive: bool,
        ctx: &EventContext<'_>,
    ) -> Option<Cmd> {
        if ctx.has_hint() {
            Some(Cmd::CompleteHint)
        } else {
            Some(Cmd::Complete)
        }
    }
}

/// Split `name {json}` into the name and optional parsed arguments.
fn split_name_and_args(args: &str) -> Result<(&str, Option<Value>), String> {
    let args = args.trim();
    let (name, rest) = args.split_once(char::is_whitespace).unwrap_or((args, ""));
    if name.is_empty() {
        return Err("missing name".to_string());
    }
    let rest = rest.trim();
    if rest.is_empty() {
        return Ok((name, None));
    }
    serde_json::from_str(rest)
        .map(|value| (name, Some(value)))
        .map_err(|e| format!("arguments are not valid JSON: {e}"))
}

/// Console state: the adapter plus a running request id.
struct ReplState {
    handler: ActionHandler,
    next_id: i64,
}

impl ReplState {
    fn new(options: ProjectOptions) -> Self {
        Self {
            handler: ActionHandler::new(options),
            next_id: 1,
        }
    }

    fn post(&self, body: Value) -> (u16, Value) {
        let response = block_on(self.handler.handle(ActionEvent::new("post").with_body(body)));
        let body = response.body_json().unwrap_or(Value::Null);
        (response.status_code, body)
    }

    fn rpc(&mut self, method: &str, params: Option<Value>) -> (u16, Value) {
        let request = JsonRpcRequest::new(self.next_id, method, params);
        self.next_id += 1;
        self.post(serde_json::to_value(request).unwrap_or_default())
    }

    fn health(&self) -> Value {
        let response = block_on(self.handler.handle(ActionEvent::new("get")));
        response.body_json().unwrap_or(Value::Null)
    }
}

fn print_json(value: &Value) {
    let text = serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string());
    for line in text.lines() {
        eprintln!("  {line}");
    }
}

/// Print an error envelope, or hand the result to `show`.
fn show_reply(status: u16, body: &Value, show: impl FnOnce(&Value)) {
    if let Some(error) = body.get("error") {
        eprintln!(
            "  \x1b[31mHTTP {status}\x1b[0m  [{}] {}",
            error["code"],
            error["message"].as_str().unwrap_or_default()
        );
    } else {
        show(&body["result"]);
    }
}

fn print_listing(items: &Value, key: &str) {
    let empty = Vec::new();
    let items = items.as_array().unwrap_or(&empty);
    eprintln!();
    eprintln!("  {} available:", items.len());
    eprintln!();
    for item in items {
        eprintln!(
            "    {:<24} {}",
            item[key].as_str().unwrap_or_default(),
            item["description"].as_str().unwrap_or_default()
        );
    }
    eprintln!();
}

fn print_text_blocks(blocks: &Value) {
    eprintln!();
    for block in blocks.as_array().into_iter().flatten() {
        let text = block
            .get("text")
            .or_else(|| block.pointer("/content/text"))
            .and_then(Value::as_str)
            .unwrap_or_default();
        for line in text.lines() {
            eprintln!("  {line}");
        }
    }
    eprintln!();
}

/// Run the interactive console.
pub fn run(options: ProjectOptions) -> anyhow::Result<()> {
    eprintln!();
    eprintln!(
        "  \x1b[32m\u{25c9}\x1b[0m \x1b[1mmcp-action v{}\x1b[0m \x1b[90m{}\x1b[0m",
        env!("CARGO_PKG_VERSION"),
        options.normalized_name()
    );
    eprintln!();
    eprintln!(
        "    Press \x1b[36m/\x1b[0m to browse commands, \x1b[90mTab\x1b[0m to complete, \x1b[90m/exit\x1b[0m to quit."
    );
    eprintln!();

    let config = Config::builder()
        .history_ignore_space(true)
        .auto_add_history(true)
        .completion_type(CompletionType::List)
        .completion_prompt_limit(20)
        .build();

    let mut rl: Editor<ActionHelper, rustyline::history::DefaultHistory> =
        Editor::with_config(config)?;
    rl.set_helper(Some(ActionHelper::new(&options)));
    rl.bind_sequence(
        KeyEvent::from('\t'),
        EventHandler::Conditional(Box::new(TabCompleteOrAcceptHint)),
    );

    let home = std::env::var("HOME")
        .or_else(|_| std::env::var("USERPROFILE"))
        .unwrap_or_else(|_| ".".to_string());
    let hist_path = std::path::PathBuf::from(&home).join(".mcp_action_history");
    if hist_path.exists() {
        let _ = rl.load_history(&hist_path);
    }

    let mut state = ReplState::new(options);
    let prompt = " \x1b[36mmcp>\x1b[0m ";

    loop {
        match rl.readline(prompt) {
            Ok(line) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }

                let input = line.strip_prefix('/').unwrap_or(line);
                if input.is_empty() {
                    cmd_help();
                    continue;
                }

                let (cmd, args) = input.split_once(' ').unwrap_or((input, ""));
                let args = args.trim();

                match cmd {
                    "exit" | "quit" => {
                        eprintln!("  Goodbye!");
                        break;
                    }
                    "help" | "h" | "?" => cmd_help(),
                    "clear" | "cls" => eprint!("\x1b[2J\x1b[H"),
                    "info" => cmd_info(&mut state),
                    "health" => print_json(&state.health()),
                    "tools" => cmd_list(&mut state, "tools/list", "tools", "name"),
                    "resources" => cmd_list(&mut state, "resources/list", "resources", "uri"),
                    "prompts" => cmd_list(&mut state, "prompts/list", "prompts", "name"),
                    "call" => cmd_call(&mut state, args),
                    "read" => cmd_read(&mut state, args),
                    "prompt" => cmd_prompt(&mut state, args),
                    "raw" => cmd_raw(&state, args),
                    _ => {
                        eprintln!("  Unknown command '/{cmd}'. Type /help for commands.");
                    }
                }
            }
            Err(ReadlineError::Interrupted) => {
                eprintln!("  \x1b[90m(Ctrl+C)\x1b[0m Type \x1b[1m/exit\x1b[0m to quit.");
            }
            Err(ReadlineError::Eof) => {
                eprintln!("  Goodbye!");
                break;
            }
            Err(err) => {
                eprintln!("  Error: {err}");
                break;
            }
        }
    }

    let _ = rl.save_history(&hist_path);

    Ok(())
}

fn cmd_help() {
    eprintln!();
    eprintln!("  Commands:");
    eprintln!();
    for (cmd, desc) in COMMANDS {
        eprintln!("    {cmd:<12} {desc}");
    }
    eprintln!();
    eprintln!("  Tip: Tab completes commands, tool names, resource URIs and prompt names.");
    eprintln!();
}

fn cmd_info(state: &mut ReplState) {
    let (status, body) = state.rpc("initialize", None);
    show_reply(status, &body, |result| {
        eprintln!();
        eprintln!(
            "  Server:   {} v{}",
            result["serverInfo"]["name"].as_str().unwrap_or_default(),
            result["serverInfo"]["version"].as_str().unwrap_or_default()
        );
        eprintln!(
            "  Protocol: {}",
            result["protocolVersion"].as_str().unwrap_or_default()
        );
        eprintln!("  Capabilities:");
        print_json(&result["capabilities"]);
        eprintln!();
    });
}

fn cmd_list(state: &mut ReplState, method: &str, key: &str, label: &str) {
    let (status, body) = state.rpc(method, None);
    show_reply(status, &body, |result| print_listing(&result[key], label));
}

fn cmd_call(state: &mut ReplState, args: &str) {
    let (name, arguments) = match split_name_and_args(args) {
        Ok(parsed) => parsed,
        Err(e) => {
            eprintln!("  Usage: /call <name> [json arguments] ({e})");
            return;
        }
    };
    let params = json!({"name": name, "arguments": arguments.unwrap_or_else(|| json!({}))});
    let (status, body) = state.rpc("tools/call", Some(params));
    show_reply(status, &body, |result| {
        print_text_blocks(&result["content"]);
        if let Some(metadata) = result.get("metadata") {
            eprintln!("  metadata:");
            print_json(metadata);
        }
    });
}

fn cmd_read(state: &mut ReplState, args: &str) {
    if args.is_empty() {
        eprintln!("  Usage: /read <uri>");
        return;
    }
    let (status, body) = state.rpc("resources/read", Some(json!({"uri": args})));
    show_reply(status, &body, |result| print_text_blocks(&result["contents"]));
}

fn cmd_prompt(state: &mut ReplState, args: &str) {
    let (name, arguments) = match split_name_and_args(args) {
        Ok(parsed) => parsed,
        Err(e) => {
            eprintln!("  Usage: /prompt <name> [json arguments] ({e})");
            return;
        }
    };
    let mut params = json!({"name": name});
    if let Some(arguments) = arguments {
        params["arguments"] = arguments;
    }
    let (status, body) = state.rpc("prompts/get", Some(params));
    show_reply(status, &body, |result| print_text_blocks(&result["messages"]));
}

fn cmd_raw(state: &ReplState, args: &str) {
    if args.is_empty() {
        eprintln!("  Usage: /raw <json body>");
        return;
    }
    let (status, body) = state.post(Value::String(args.to_string()));
    eprintln!("  HTTP {status}");
    print_json(&body);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_name_and_args() {
        let (name, args) = split_name_and_args("echo {\"message\": \"hi\"}").unwrap();
        assert_eq!(name, "echo");
        assert_eq!(args, Some(json!({"message": "hi"})));

        let (name, args) = split_name_and_args("  weather  ").unwrap();
        assert_eq!(name, "weather");
        assert!(args.is_none());

        assert!(split_name_and_args("").is_err());
        assert!(split_name_and_args("echo {oops").is_err());
    }

    #[test]
    fn test_state_ids_advance() {
        let mut state = ReplState::new(ProjectOptions::default());
        let (status, first) = state.rpc("tools/list", None);
        assert_eq!(status, 200);
        let (_, second) = state.rpc("prompts/list", None);
        assert_eq!(first["id"], 1);
        assert_eq!(second["id"], 2);
    }

    #[test]
    fn test_raw_goes_through_decoder() {
        let state = ReplState::new(ProjectOptions::default());
        let (status, body) = state.post(Value::String("not json".to_string()));
        assert_eq!(status, 500);
        assert_eq!(body["error"]["code"], -32603);
    }

    #[test]
    fn test_helper_candidates() {
        let helper = ActionHelper::new(&ProjectOptions::default());
        assert!(helper.candidates("/call").contains(&"calculator".to_string()));
        assert!(helper
            .candidates("/read")
            .contains(&"docs://api".to_string()));
        assert!(helper.candidates("/tools").is_empty());
    }
}
