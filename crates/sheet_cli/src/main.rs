use std::path::PathBuf;
use std::process;

use clap::Parser;
use serde_json::Value as JsonValue;
use sheet_core::core_api::{
    CharacterRecord, ListField, NumericField, SheetCodec, TextField,
    decode_weapon_line_with_issues,
};
use sheet_render::{
    FieldSelection, JsonStyle, render_json_full, render_json_selected, render_selected_pairs,
    render_sheet,
};

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Cli {
    #[arg(value_name = "SHEET.txt", required_unless_present = "new")]
    path: Option<PathBuf>,
    /// Start from a blank sheet instead of reading one.
    #[arg(long, conflicts_with = "path")]
    new: bool,
    #[arg(long)]
    name: bool,
    #[arg(long)]
    identity: bool,
    #[arg(long)]
    attributes: bool,
    #[arg(long)]
    skills: bool,
    #[arg(long)]
    wounds: bool,
    #[arg(long)]
    experience: bool,
    #[arg(long)]
    talents: bool,
    #[arg(long)]
    gear: bool,
    #[arg(long)]
    weapons: bool,
    #[arg(long)]
    armour: bool,
    #[arg(long)]
    psyker: bool,
    #[arg(long)]
    status: bool,
    #[arg(long)]
    json: bool,
    /// Set an identity text field or a numeric field by its file key.
    #[arg(long = "set", value_name = "KEY=VALUE", value_parser = parse_key_value)]
    set: Vec<(String, String)>,
    #[arg(long = "train", value_name = "SKILL")]
    train: Vec<String>,
    #[arg(long = "untrain", value_name = "SKILL")]
    untrain: Vec<String>,
    #[arg(long = "skill-rank", value_name = "SKILL=N", value_parser = parse_key_value)]
    skill_rank: Vec<(String, String)>,
    /// Append an entry to talents, gear, powers, mutations or disorders.
    #[arg(long = "add", value_name = "LIST=TEXT", value_parser = parse_key_value)]
    add: Vec<(String, String)>,
    /// Remove the entry at a zero-based index.
    #[arg(long = "remove", value_name = "LIST=INDEX", value_parser = parse_key_value)]
    remove: Vec<(String, String)>,
    /// Append a weapon given as a `|`-separated sheet line.
    #[arg(long = "add-weapon", value_name = "LINE")]
    add_weapon: Vec<String>,
    #[arg(long = "remove-weapon", value_name = "INDEX")]
    remove_weapon: Vec<usize>,
    #[arg(long)]
    output: Option<PathBuf>,
}

impl Cli {
    fn field_selection(&self) -> FieldSelection {
        FieldSelection {
            name: self.name,
            identity: self.identity,
            attributes: self.attributes,
            skills: self.skills,
            wounds: self.wounds,
            experience: self.experience,
            talents: self.talents,
            gear: self.gear,
            weapons: self.weapons,
            armour: self.armour,
            psyker: self.psyker,
            status: self.status,
        }
    }

    fn has_edits(&self) -> bool {
        !self.set.is_empty()
            || !self.train.is_empty()
            || !self.untrain.is_empty()
            || !self.skill_rank.is_empty()
            || !self.add.is_empty()
            || !self.remove.is_empty()
            || !self.add_weapon.is_empty()
            || !self.remove_weapon.is_empty()
    }
}

/// Target of a `--set KEY=VALUE` edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SetTarget {
    Text(TextField),
    Number(NumericField),
}

impl SetTarget {
    fn from_key(key: &str) -> Option<Self> {
        TextField::from_key(key)
            .map(Self::Text)
            .or_else(|| NumericField::from_key(key).map(Self::Number))
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    let fields = cli.field_selection();
    let has_edits = cli.has_edits();

    if has_edits && cli.output.is_none() {
        usage_error("edit flags require --output <PATH>");
    }
    if !has_edits && !cli.new && cli.output.is_some() {
        usage_error("--output requires --new or at least one edit flag");
    }

    let set_edits: Vec<(SetTarget, &str)> = cli
        .set
        .iter()
        .map(|(key, value)| match SetTarget::from_key(key) {
            Some(target) => (target, value.as_str()),
            None => usage_error(&format!("unknown field key '{key}'")),
        })
        .collect();
    let list_adds: Vec<(ListField, &str)> = cli
        .add
        .iter()
        .map(|(list, text)| (resolve_list(list), text.as_str()))
        .collect();
    let list_removes: Vec<(ListField, usize)> = cli
        .remove
        .iter()
        .map(|(list, index)| {
            let index = index.trim().parse::<usize>().unwrap_or_else(|_| {
                usage_error(&format!("invalid index '{index}' for --remove {list}"))
            });
            (resolve_list(list), index)
        })
        .collect();
    let rank_edits: Vec<(&str, i64)> = cli
        .skill_rank
        .iter()
        .map(|(skill, rank)| {
            let rank = rank.trim().parse::<i64>().unwrap_or_else(|_| {
                usage_error(&format!("invalid rank '{rank}' for skill '{skill}'"))
            });
            (skill.as_str(), rank)
        })
        .collect();

    let codec = SheetCodec::new();
    let mut record = match &cli.path {
        Some(path) => codec.decode(path).unwrap_or_else(|e| {
            eprintln!("Error reading sheet: {}", path.display());
            eprintln!("  {e}");
            process::exit(1);
        }),
        None => CharacterRecord::new_default(),
    };

    for (target, value) in &set_edits {
        match *target {
            SetTarget::Text(field) => record.set_text(field, *value),
            SetTarget::Number(field) => {
                if !record.set_attribute_text(field, value) {
                    log::warn!("{} = {value:?} is not a number, storing 0", field.key());
                }
            }
        }
    }
    for skill in &cli.train {
        set_trained(&mut record, skill, true);
    }
    for skill in &cli.untrain {
        set_trained(&mut record, skill, false);
    }
    for (skill, rank) in &rank_edits {
        match record.skill_mut(skill) {
            Some(state) => state.set_rank(*rank),
            None => usage_error(&format!("unknown skill '{skill}'")),
        }
    }
    for (list, text) in &list_adds {
        record.add_list_entry(*list, *text);
    }
    for (list, index) in &list_removes {
        record.remove_list_entry(*list, *index).unwrap_or_else(|e| {
            eprintln!("Error applying {} edit: {e}", list.key());
            process::exit(1);
        });
    }
    for line in &cli.add_weapon {
        let (weapon, issues) = decode_weapon_line_with_issues(line).unwrap_or_else(|| {
            eprintln!("Error parsing weapon line {line:?}");
            eprintln!("  expected 10 '|'-separated fields and a non-blank name");
            process::exit(1);
        });
        for issue in &issues {
            log::warn!("weapon {:?}: {issue}", weapon.name);
        }
        record.add_weapon(weapon).unwrap_or_else(|e| {
            eprintln!("Error applying weapon edit: {e}");
            process::exit(1);
        });
    }
    for index in &cli.remove_weapon {
        record.remove_weapon(*index).unwrap_or_else(|e| {
            eprintln!("Error applying weapon edit: {e}");
            process::exit(1);
        });
    }

    if let Some(out_path) = &cli.output {
        codec.encode(&record, out_path).unwrap_or_else(|e| {
            eprintln!("Error writing {}: {e}", out_path.display());
            process::exit(1);
        });
        log::info!("wrote {}", out_path.display());
    }

    if cli.json {
        let json: JsonValue = if fields.is_any_selected() {
            render_json_selected(&record, &fields, JsonStyle::CanonicalV1)
        } else {
            render_json_full(&record, JsonStyle::CanonicalV1)
        };
        let rendered = serde_json::to_string_pretty(&json).unwrap_or_else(|e| {
            eprintln!("Error rendering JSON output: {e}");
            process::exit(1);
        });
        println!("{rendered}");
        return;
    }

    if fields.is_any_selected() {
        for (key, value) in render_selected_pairs(&record, &fields) {
            println!("{key}={value}");
        }
        return;
    }

    if let Some(out_path) = &cli.output {
        println!("Wrote sheet to {}", out_path.display());
        return;
    }

    print!("{}", render_sheet(&record));
}

fn set_trained(record: &mut CharacterRecord, skill: &str, trained: bool) {
    match record.skill_mut(skill) {
        Some(state) => state.trained = trained,
        None => usage_error(&format!("unknown skill '{skill}'")),
    }
}

fn resolve_list(name: &str) -> ListField {
    ListField::from_key(name).unwrap_or_else(|| {
        usage_error(&format!(
            "unknown list '{name}', expected one of: talents, gear, powers, mutations, disorders"
        ))
    })
}

fn usage_error(message: &str) -> ! {
    eprintln!("{message}");
    process::exit(2);
}

fn parse_key_value(value: &str) -> Result<(String, String), String> {
    let Some((key, rest)) = value.split_once('=') else {
        return Err(format!("invalid value '{value}', expected KEY=VALUE"));
    };
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("invalid value '{value}', key is empty"));
    }
    Ok((key.to_string(), rest.to_string()))
}
