use crate::shared::XmlElement;

/// Сервисный пользователь декларанта
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ServiceUser {
    pub id: i64,
    pub user_name: String,
    /// Уникальный номер налогоплательщика
    pub un_id: i64,
    /// IP, с которого разрешены вызовы
    pub ip: String,
    /// Название объекта / магазина
    pub name: String,
}

impl ServiceUser {
    pub fn from_xml(element: &XmlElement) -> Self {
        Self {
            id: element.get_int("ID", 0),
            user_name: element.get_text("USER_NAME", ""),
            un_id: element.get_int("UN_ID", 0),
            ip: element.get_text("IP", ""),
            name: element.get_text("NAME", ""),
        }
    }
}

/// Акцизный код товара
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AkcizCode {
    pub id: i64,
    pub title: String,
    pub measurement: String,
    pub commodity_code: String,
    pub rate: f64,
}

impl AkcizCode {
    pub fn from_xml(element: &XmlElement) -> Self {
        Self {
            id: element.get_int("ID", 0),
            title: element.get_text("TITLE", ""),
            measurement: element.get_text("MEASUREMENT", ""),
            commodity_code: element.get_text("SAKON_KODI", ""),
            rate: element.get_decimal("AKCIS_GANAKV", 0.0),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct WayBillTypeInfo {
    pub id: i64,
    pub name: String,
}

impl WayBillTypeInfo {
    pub fn from_xml(element: &XmlElement) -> Self {
        Self {
            id: element.get_int("ID", 0),
            name: element.get_text("NAME", ""),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct WayBillUnit {
    pub id: i64,
    pub name: String,
}

impl WayBillUnit {
    pub fn from_xml(element: &XmlElement) -> Self {
        Self {
            id: element.get_int("ID", 0),
            name: element.get_text("NAME", ""),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransportType {
    pub id: i64,
    pub name: String,
}

impl TransportType {
    pub fn from_xml(element: &XmlElement) -> Self {
        Self {
            id: element.get_int("ID", 0),
            name: element.get_text("NAME", ""),
        }
    }
}

/// Вид древесины (для накладных категории «ხე-ტყე»)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WoodType {
    pub id: i64,
    pub name: String,
    pub description: String,
}

impl WoodType {
    pub fn from_xml(element: &XmlElement) -> Self {
        Self {
            id: element.get_int("ID", 0),
            name: element.get_text("NAME", ""),
            description: element.get_text("DESCRIPTION", ""),
        }
    }
}

/// Справочник кодов ошибок сервиса
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ErrorCode {
    /// Отрицательный код
    pub id: i64,
    pub text: String,
    /// 1 - накладная, 2 - товарная позиция, 3 - счёт-фактура
    pub error_type: i64,
}

impl ErrorCode {
    pub fn from_xml(element: &XmlElement) -> Self {
        Self {
            id: element.get_int("ID", 0),
            text: element.get_text("TEXT", ""),
            error_type: element.get_int("TYPE", 0),
        }
    }
}

/// Сохранённый шаблон накладной (только заголовок)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WayBillTemplate {
    pub id: i64,
    pub name: String,
}

impl WayBillTemplate {
    /// Все элементы ответа с ненулевым `ID`
    pub fn list_from_xml(result: &XmlElement) -> Vec<Self> {
        result
            .descendants()
            .into_iter()
            .filter_map(|element| {
                let id = element.get_int("ID", 0);
                (id != 0).then(|| Self {
                    id,
                    name: element.get_text("NAME", ""),
                })
            })
            .collect()
    }
}

/// Запись личного каталога штрихкодов
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BarCodeEntry {
    pub bar_code: String,
    pub goods_name: String,
    pub unit_id: i64,
    pub unit_txt: String,
    pub akciz_id: i64,
}

impl BarCodeEntry {
    /// Все элементы ответа с полем `bar_code`
    pub fn list_from_xml(result: &XmlElement) -> Vec<Self> {
        result
            .descendants()
            .into_iter()
            .filter_map(|element| {
                let bar_code = element.get_text("bar_code", "");
                (!bar_code.is_empty()).then(|| Self {
                    bar_code,
                    goods_name: element.get_text("goods_name", ""),
                    unit_id: element.get_int("unit_id", 0),
                    unit_txt: element.get_text("unit_txt", ""),
                    akciz_id: element.get_int("a_id", 0),
                })
            })
            .collect()
    }
}
