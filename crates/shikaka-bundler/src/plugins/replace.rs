//! Literal replacement of build-time markers such as `process.env.NODE_ENV`.

use std::borrow::Cow;
use std::collections::BTreeMap;

use rolldown_common::ModuleType;
use rolldown_plugin::{
    HookTransformArgs, HookTransformOutput, HookTransformReturn, HookUsage, Plugin,
    SharedTransformPluginContext,
};

/// Replaces every occurrence of each key with its value.
///
/// Replacement is a single left-to-right pass over the original source, so a
/// substituted value is never itself rewritten. Where two keys match at the
/// same position the longer one wins. A match is only taken on identifier
/// boundaries: `NODE_ENV` does not match inside `NODE_ENV_NAME`, and a key
/// reached through property access (`foo.process.env.NODE_ENV`) is left alone.
#[derive(Debug, Clone)]
pub struct ReplacePlugin {
    replacements: BTreeMap<String, String>,
    /// Keys sorted longest first
    keys: Vec<String>,
}

impl ReplacePlugin {
    pub fn new(replacements: BTreeMap<String, String>) -> Self {
        let mut keys: Vec<String> = replacements
            .keys()
            .filter(|key| !key.is_empty())
            .cloned()
            .collect();
        keys.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
        Self { replacements, keys }
    }

    /// Apply the replacements to `code`, or `None` if nothing matched.
    pub fn apply(&self, code: &str) -> Option<String> {
        if self.keys.is_empty() {
            return None;
        }

        let mut out = String::with_capacity(code.len());
        let mut last = 0;
        let mut pos = 0;
        let mut changed = false;

        while pos < code.len() {
            let rest = &code[pos..];
            let hit = self.keys.iter().find(|key| {
                rest.starts_with(key.as_str()) && on_boundary(code, pos, pos + key.len())
            });

            match hit {
                Some(key) => {
                    out.push_str(&code[last..pos]);
                    out.push_str(&self.replacements[key]);
                    pos += key.len();
                    last = pos;
                    changed = true;
                }
                None => {
                    pos += rest.chars().next().map_or(1, char::len_utf8);
                }
            }
        }

        if !changed {
            return None;
        }
        out.push_str(&code[last..]);
        Some(out)
    }
}

fn is_ident_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '$'
}

/// Whether the text before `start` is a member access dot. A spread
/// (`...key`) is not.
fn after_member_dot(code: &str, start: usize) -> bool {
    let mut before = code[..start].chars().rev();
    before.next() == Some('.') && before.next() != Some('.')
}

/// Whether `code[start..end]` is not glued to a surrounding identifier.
fn on_boundary(code: &str, start: usize, end: usize) -> bool {
    let matched = &code[start..end];
    let glued_before = matched.starts_with(is_ident_char)
        && (code[..start].chars().next_back().is_some_and(is_ident_char)
            || after_member_dot(code, start));
    let glued_after = matched.ends_with(is_ident_char)
        && code[end..].chars().next().is_some_and(is_ident_char);
    !glued_before && !glued_after
}

impl Plugin for ReplacePlugin {
    fn name(&self) -> Cow<'static, str> {
        "shikaka-replace".into()
    }

    fn register_hook_usage(&self) -> HookUsage {
        HookUsage::Transform
    }

    fn transform(
        &self,
        _ctx: SharedTransformPluginContext,
        args: &HookTransformArgs<'_>,
    ) -> impl std::future::Future<Output = HookTransformReturn> + Send {
        let is_script = matches!(
            args.module_type,
            ModuleType::Js | ModuleType::Jsx | ModuleType::Ts | ModuleType::Tsx
        );
        let replaced = if is_script {
            self.apply(args.code)
        } else {
            None
        };

        async move {
            Ok(replaced.map(|code| HookTransformOutput {
                code: Some(code),
                map: None,
                side_effects: None,
                module_type: None,
            }))
        }
    }
}
