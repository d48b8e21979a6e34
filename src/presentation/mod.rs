/// プレゼンテーション層モジュール
///
/// # モジュール
/// - `input`: ユーザー入力処理
/// - `output`: コマンド結果の出力（人間向け・機械向け）
/// - `progress`: アップロード進捗の表示変換
pub mod input;
pub mod output;
pub mod progress;
