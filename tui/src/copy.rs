//! On-screen text.

pub const QUESTION_PREFIX: &str = "Gina, vols ser el meu ";
pub const QUESTION_HIGHLIGHT: &str = "Sant Valentí";
pub const QUESTION_SUFFIX: &str = "?";

pub const AFFIRMATIVE_LABEL: &str = "SÍ!";
pub const NOTE: &str = "* Atenció: El botó 'No' té por de la teva bellesa i s'està fent petit...";
pub const QUESTION_FOOTER: &str = "Per a la reina del meu cor";

pub const LOADING: &str = "Preparant una cosa màgica per a la Gina...";

pub const CELEBRATION_TITLE: &str = "SÍÍÍ! HO SABIA! 💍❤️";
pub const CELEBRATION_TITLE_ASCII: &str = "SÍÍÍ! HO SABIA! <3";
pub const CERTIFICATE: &str =
    "\"Certificat oficial de la Gina com la millor Sant Valentí de l'univers.\"";
pub const CHIP_MUSIC: &str = "Música per ballar";
pub const CHIP_KISSES: &str = "Molts petons";
pub const CHIP_FUTURE: &str = "Un futur brillant";
pub const CELEBRATION_FOOTER: &str = "Prepara't Gina, que aquest Sant Valentí serà llegendari...";

pub const KEY_HINT: &str = "s/Enter: SÍ   n: No   q: sortir";
