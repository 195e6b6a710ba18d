//! Числовые коды SOAP-сервиса WayBill.

use crate::coded_enum;

coded_enum! {
    /// Тип накладной (ზედნადების ტიპი)
    pub enum WayBillType {
        /// Внутреннее перемещение в пределах одного лица
        InnerTransport = 1 => "შიდა გადაზიდვა",
        /// Поставка с транспортировкой
        Transportation = 2 => "მიწოდება ტრანსპორტირებით",
        WithoutTransportation = 3 => "მიწოდება ტრანსპორტირების გარეშე",
        /// Основная накладная дистрибуции; содержит дочерние накладные
        Distribution = 4 => "დისტრიბუცია",
        Return = 5 => "საქონლის უკან დაბრუნება",
        /// Дочерняя накладная дистрибуции
        SubWayBill = 6 => "ქვე-ზედნადები",
    }
}

coded_enum! {
    /// Статус накладной
    pub enum WayBillStatus {
        /// Черновик
        Saved = 0 => "შენახული",
        /// Перевозка начата
        Active = 1 => "აქტიური",
        Completed = 2 => "დასრულებული",
        SentToTransporter = 8 => "გადამზიდავთან გადაგზავნილი",
        Deleted = -1 => "წაშლილი",
        Cancelled = -2 => "გაუქმებული",
    }
}

coded_enum! {
    pub enum TransportationType {
        Truck = 1 => "სატვირთო მანქანა",
        Vehicle = 2 => "მსუბუქი ავტომობილი",
        Railway = 3 => "რკინიგზა",
        /// Требует `TRANS_TXT`
        Other = 4 => "სხვა",
    }
}

coded_enum! {
    /// НДС товарной позиции
    pub enum VatType {
        Regular = 0 => "ჩვეულებრივი",
        ZeroRate = 1 => "ნულოვანი",
        Exempt = 2 => "დაუბეგრავი",
    }
}

coded_enum! {
    pub enum CategoryType {
        Regular = 0 => "ჩვეულებრივი",
        /// Лесоматериалы; нужны документы и бирки на древесину
        Wood = 1 => "ხე-ტყე",
    }
}

coded_enum! {
    /// Кто оплачивает перевозку
    pub enum TransportCostPayer {
        Buyer = 1 => "მყიდველი",
        Seller = 2 => "გამყიდველი",
    }
}

coded_enum! {
    /// Статус подтверждения покупателем для фильтров `*_ex`
    pub enum ConfirmationStatus {
        Unconfirmed = 0 => "დაუდასტურებელი",
        Confirmed = 1 => "დადასტურებული",
        Rejected = -1 => "უარყოფილი",
    }
}

coded_enum! {
    pub enum BusinessStatus {
        None = 0 => "სტატუსის გარეშე",
        Micro = 1 => "მიკრო ბიზნესის სტატუსი",
        Small = 2 => "მცირე ბიზნესის სტატუსი",
    }
}

coded_enum! {
    /// Решение таможенного пункта
    pub enum CustomsConfirmStatus {
        Confirmed = 1 => "დადასტურებული",
        Rejected = 2 => "უარყოფილი",
    }
}

impl Default for WayBillType {
    fn default() -> Self {
        Self::Transportation
    }
}

impl Default for WayBillStatus {
    fn default() -> Self {
        Self::Saved
    }
}

impl Default for VatType {
    fn default() -> Self {
        Self::Regular
    }
}

impl Default for CategoryType {
    fn default() -> Self {
        Self::Regular
    }
}

impl Default for TransportCostPayer {
    fn default() -> Self {
        Self::Seller
    }
}

impl Default for ConfirmationStatus {
    fn default() -> Self {
        Self::Unconfirmed
    }
}
