//! Every piece of user-facing text. The game ships in Japanese only.

use animaru_core::AnimalVariant;

pub(crate) const TITLE: &str = "どうぶつパズル";
pub(crate) const SCORE_LABEL: &str = "スコア";
pub(crate) const NEW_GAME: &str = "あたらしいゲーム";
pub(crate) const GRID_HEADING: &str = "どうぶつをつくろう";
pub(crate) const POOL_HEADING: &str = "ブロック";

pub(crate) fn banner_heading(variant: &AnimalVariant) -> String {
    format!("🎉 {} {}の完成！ 🎉", variant.icon, variant.display_name)
}

pub(crate) fn banner_body(variant: &AnimalVariant) -> String {
    format!("{}のパズルをかんせいできました！", variant.display_name)
}
