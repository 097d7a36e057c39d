/*!
 * Bearer token extractor
 *
 * Responsibility:
 * - `Authorization: Bearer <token>` から生の token を取り出して handler に渡す
 * - ここでは検証しない (検証は services::graphql::auth の decorator の責務)
 * - token が無い/形式が違う場合も reject せず None を返す
 *   (auth bypass 対象の operation はトークン無しで通すため)
 */

mod core;

pub use self::core::BearerToken;
