//! Interface entre o desambiguador e os tokens da sentença.

use crate::sense::PartOfSpeech;

/// Um token que pode receber um sentido.
///
/// O desambiguador lê a forma lexical e a classe gramatical, e escreve o
/// sentido escolhido uma única vez.
pub trait Annotation {
    /// Forma lexical usada na consulta à ontologia.
    fn word(&self) -> &str;

    /// Classe gramatical, se conhecida. Restringe os candidatos.
    fn pos(&self) -> Option<PartOfSpeech>;

    /// Sentido já atribuído.
    fn sense(&self) -> Option<&str>;

    /// Atribui o sentido. Retorna `false` (e não altera nada) se já havia um.
    fn assign_sense(&mut self, sense_key: String) -> bool;
}
