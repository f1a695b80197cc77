pub const EN_NAMESPACES: [&str; 2] = ["File", "Image"];
pub const EN_ALT_PARAMS: [&str; 1] = ["alt"];
pub const DE_NAMESPACES: [&str; 2] = ["Datei", "Bild"];
pub const DE_ALT_PARAMS: [&str; 2] = ["alternativtext", "alt"];
pub const AR_NAMESPACES: [&str; 2] = ["ملف", "صورة"];
pub const AR_ALT_PARAMS: [&str; 2] = ["بديل", "alt"];

pub const CAT_IMAGE: &str =
	"[[File: Cat.jpg | thumb | 220x124px | right | alt=Cat alt text | Cat caption text]]";

pub const CAT_ARTICLE: &str = include_str!("fixtures/cat.wikitext");
pub const CAT_ARTICLE_WITH_IMAGE: &str = include_str!("fixtures/cat_with_image.wikitext");

pub const AR_IMAGE: &str = "[[ملف:Feral_cat_2.JPG|تصغير|يمين|بديل=test2|test]]";
pub const AR_ARTICLE: &str = include_str!("fixtures/arabic.wikitext");
pub const AR_ARTICLE_WITH_IMAGE: &str = include_str!("fixtures/arabic_with_image.wikitext");

pub const ZH_IMAGE: &str = "[[File:問號貓貓.jpg|thumb|right|alt=test2|test]]";
pub const ZH_ARTICLE: &str = include_str!("fixtures/chinese.wikitext");
pub const ZH_ARTICLE_WITH_IMAGE: &str = include_str!("fixtures/chinese_with_image.wikitext");

pub const DE_IMAGE: &str =
	"[[Datei:Hauskatze_in_Abendsonne.jpg|mini|rechts|alternativtext=test2|test]]";
pub const DE_ARTICLE: &str = include_str!("fixtures/german.wikitext");
pub const DE_ARTICLE_WITH_IMAGE: &str = include_str!("fixtures/german_with_image.wikitext");

pub const DOG_IMAGE: &str = "[[File:Dog (Canis lupus familiaris) (5).JPG|thumb|Canis lupus familiaris]]";

pub const DOG_ARTICLE: &str = include_str!("fixtures/dog.wikitext");
pub const DOG_ARTICLE_WITH_ALT: &str = include_str!("fixtures/dog_with_alt.wikitext");

pub const MURATOVA_IMAGE: &str = "[[File:KiraMuratova OdFest.jpg|thumb|Muratova in 2010 \
                                  conducting her personal master class at the [[Odessa \
                                  International Film Festival]].]]";

pub const MURATOVA_CAPTION: &str = "Muratova in 2010 conducting her personal master class at the \
                                    Odessa International Film Festival.";

pub fn muratova_article() -> String {
	format!("{{{{Expand section|date=April 2013}}}}\n{MURATOVA_IMAGE}")
}
